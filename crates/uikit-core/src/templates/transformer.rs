//! Placeholder substitution for stub files
//!
//! Stubs carry a fixed set of `{{ token }}` placeholders. Substitution is a
//! single left-to-right pass, so a substituted value is never rescanned and
//! unknown `{{ ... }}` sequences (Blade echoes) pass through untouched.

use crate::config::ProjectConfig;
use crate::registry::bundle::class_name;

/// Prefix of the Blade view identifier given to class components
pub const VIEW_PREFIX: &str = "livewire.ui.";

/// Recognized placeholders
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token {
    Namespace,
    Class,
    View,
    ComponentName,
}

impl Token {
    pub const ALL: [Token; 4] = [Token::Namespace, Token::Class, Token::View, Token::ComponentName];

    pub fn literal(self) -> &'static str {
        match self {
            Token::Namespace => "{{ namespace }}",
            Token::Class => "{{ class }}",
            Token::View => "{{ view }}",
            Token::ComponentName => "{{ componentName }}",
        }
    }
}

/// Values substituted for one component
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Substitutions {
    namespace: String,
    class: String,
    view: String,
    component_name: String,
}

impl Substitutions {
    pub fn new(component_name: &str, config: &ProjectConfig) -> Self {
        let lower = component_name.to_lowercase();
        Self {
            namespace: config.namespace.clone(),
            class: class_name(component_name),
            view: format!("{VIEW_PREFIX}{lower}"),
            component_name: lower,
        }
    }

    pub fn value(&self, token: Token) -> &str {
        match token {
            Token::Namespace => &self.namespace,
            Token::Class => &self.class,
            Token::View => &self.view,
            Token::ComponentName => &self.component_name,
        }
    }

    /// Replace every recognized token in `content`
    pub fn apply(&self, content: &str) -> String {
        let mut out = String::with_capacity(content.len());
        let mut rest = content;

        while let Some(start) = rest.find("{{") {
            out.push_str(&rest[..start]);
            let candidate = &rest[start..];

            match Token::ALL
                .into_iter()
                .find(|token| candidate.starts_with(token.literal()))
            {
                Some(token) => {
                    out.push_str(self.value(token));
                    rest = &candidate[token.literal().len()..];
                }
                None => {
                    out.push('{');
                    rest = &candidate[1..];
                }
            }
        }

        out.push_str(rest);
        out
    }
}

/// Substitute the placeholders of `content` for `component_name`
pub fn transform(content: &str, component_name: &str, config: &ProjectConfig) -> String {
    Substitutions::new(component_name, config).apply(content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TailwindMode;
    use pretty_assertions::assert_eq;

    fn config() -> ProjectConfig {
        ProjectConfig::new("App\\", TailwindMode::V4, None)
    }

    #[test]
    fn test_class_stub() {
        let stub = "<?php\n\nnamespace {{ namespace }};\n\nclass {{ class }} extends Component\n{\n    public function render()\n    {\n        return view('{{ view }}');\n    }\n}\n";
        let expected = "<?php\n\nnamespace App\\Livewire\\UI;\n\nclass Toast extends Component\n{\n    public function render()\n    {\n        return view('livewire.ui.toast');\n    }\n}\n";
        assert_eq!(transform(stub, "toast", &config()), expected);
    }

    #[test]
    fn test_every_token_is_replaced() {
        for name in ["button", "date-picker", "Modal", "x"] {
            for token in Token::ALL {
                let out = transform(&format!("a {} b", token.literal()), name, &config());
                assert!(!out.contains(token.literal()), "{:?} left in {out}", token);
            }
        }
    }

    #[test]
    fn test_component_name_is_lowercased() {
        assert_eq!(
            transform("{{ componentName }}|{{ class }}|{{ view }}", "DatePicker", &config()),
            "datepicker|DatePicker|livewire.ui.datepicker"
        );
    }

    #[test]
    fn test_blade_echoes_and_unknown_tokens_survive() {
        let stub = "{{ $slot }} {{ unknown }} {{{ class }} {{";
        assert_eq!(transform(stub, "card", &config()), "{{ $slot }} {{ unknown }} {Card {{");
    }

    #[test]
    fn test_values_are_not_rescanned() {
        let mut config = config();
        config.namespace = "{{ class }}".to_string();
        assert_eq!(transform("{{ namespace }}", "card", &config), "{{ class }}");
    }

    #[test]
    fn test_multibyte_content() {
        assert_eq!(transform("é{{ class }}ü", "ñandú", &config()), "éÑandúü");
    }
}
