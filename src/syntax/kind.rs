use std::fmt;

/// Kind of a declared definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DefinitionKind {
    /// Data type with single inheritance and SQL-backed attributes.
    Type,
    /// UI action.
    Command,
    /// UI navigation; composes commands and menus.
    Menu,
    /// Table layout referenced as a command/menu target.
    Table,
    /// Form layout referenced as a command/menu target.
    Form,
}

impl DefinitionKind {
    pub const ALL: [DefinitionKind; 5] = [
        DefinitionKind::Type,
        DefinitionKind::Command,
        DefinitionKind::Menu,
        DefinitionKind::Table,
        DefinitionKind::Form,
    ];

    /// Block keyword used in definition files.
    pub fn keyword(self) -> &'static str {
        match self {
            DefinitionKind::Type => "Type",
            DefinitionKind::Command => "Command",
            DefinitionKind::Menu => "Menu",
            DefinitionKind::Table => "Table",
            DefinitionKind::Form => "Form",
        }
    }

    pub fn from_keyword(keyword: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.keyword() == keyword)
    }

    /// Commands and menus: may declare children and targets.
    pub fn is_navigable(self) -> bool {
        matches!(self, DefinitionKind::Command | DefinitionKind::Menu)
    }
}

impl fmt::Display for DefinitionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// Kind a child reference was declared with (`CommandRef(..)` / `MenuRef(..)`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChildKind {
    Command,
    Menu,
}

impl ChildKind {
    pub fn keyword(self) -> &'static str {
        match self {
            ChildKind::Command => "CommandRef",
            ChildKind::Menu => "MenuRef",
        }
    }

    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "CommandRef" => Some(ChildKind::Command),
            "MenuRef" => Some(ChildKind::Menu),
            _ => None,
        }
    }

    /// The definition kind this reference expects to find.
    pub fn expected_kind(self) -> DefinitionKind {
        match self {
            ChildKind::Command => DefinitionKind::Command,
            ChildKind::Menu => DefinitionKind::Menu,
        }
    }
}
