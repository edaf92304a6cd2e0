use crate::assistant::AssistantError;
use serde::{Deserialize, Serialize};

/// Macro to generate enum with as_str + std::str::FromStr pattern
macro_rules! str_enum {
    ($name:ident { $($variant:ident => $s:literal),+ $(,)? }) => {
        #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
        #[serde(rename_all = "snake_case")]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $s),+
                }
            }
        }

        impl std::str::FromStr for $name {
            type Err = AssistantError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($s => Ok(Self::$variant)),+,
                    _ => Err(AssistantError::InvalidEnum {
                        field: stringify!($name).into(),
                        value: s.into(),
                    }),
                }
            }
        }
    };
}

str_enum!(MessageRole {
    User => "user",
    Model => "model",
});

str_enum!(ResponseStyle {
    Default => "default",
    Formal => "formal",
    Casual => "casual",
    Concise => "concise",
});

str_enum!(EditorAction {
    Summarize => "summarize",
    FixGrammar => "fix_grammar",
    Expand => "expand",
    MakeProfessional => "make_professional",
    TranslateEs => "translate_es",
});

str_enum!(AppTheme {
    Blue => "blue",
    Violet => "violet",
    Emerald => "emerald",
    Orange => "orange",
    Rose => "rose",
    Slate => "slate",
});
