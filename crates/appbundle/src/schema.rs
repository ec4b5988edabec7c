//! Versioned schema tables for the bundle manifest.
//!
//! A [`Schema`] holds one ordered rule list per nesting [`Level`] of the
//! manifest. It is built once from a [`SchemaBounds`] value and is read-only
//! afterwards; the validator receives it by reference.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Version of the built-in rule tables.
pub const SCHEMA_VERSION: u32 = 1;

/// Nesting levels of the manifest, each with its own rule list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Level {
    Root,
    Menu,
    MenuEntry,
    PageContent,
    PageColumn,
    Dashboard,
    SettingGroup,
    Setting,
    ProductSetting,
}

impl Level {
    /// Every level, root first.
    pub const ALL: [Level; 9] = [
        Level::Root,
        Level::Menu,
        Level::MenuEntry,
        Level::PageContent,
        Level::PageColumn,
        Level::Dashboard,
        Level::SettingGroup,
        Level::Setting,
        Level::ProductSetting,
    ];

    /// Name of the level as it appears in violation messages.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Root => "root",
            Level::Menu => "menu",
            Level::MenuEntry => "menuEntry",
            Level::PageContent => "pageContent",
            Level::PageColumn => "pageColumn",
            Level::Dashboard => "dashboard",
            Level::SettingGroup => "settingGroup",
            Level::Setting => "setting",
            Level::ProductSetting => "productSetting",
        }
    }
}

impl std::fmt::Display for Level {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Primitive type accepted by a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    Boolean,
    Integer,
    Decimal,
    String,
    Array,
}

impl std::fmt::Display for FieldType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            FieldType::Boolean => "boolean",
            FieldType::Integer => "integer",
            FieldType::Decimal => "decimal",
            FieldType::String => "string",
            FieldType::Array => "array",
        };
        f.write_str(name)
    }
}

/// Accepted shape of a single manifest field.
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaRule {
    /// Field name as written in the manifest.
    pub name: &'static str,

    /// Whether the key must be present.
    pub required: bool,

    /// Primitive type of the value.
    pub field_type: FieldType,

    /// Inclusive lower bound for numeric fields.
    pub min: Option<f64>,

    /// Inclusive upper bound: numeric value for numbers, character count for
    /// strings. `None` means unbounded.
    pub max: Option<f64>,

    /// Level that each element of an array field is validated against.
    pub nested: Option<Level>,
}

impl SchemaRule {
    fn new(name: &'static str, required: bool, field_type: FieldType) -> Self {
        Self {
            name,
            required,
            field_type,
            min: None,
            max: None,
            nested: None,
        }
    }

    /// A string field; `max_len` of `None` leaves the length unbounded.
    pub fn string(name: &'static str, required: bool, max_len: Option<usize>) -> Self {
        Self {
            max: max_len.map(|len| len as f64),
            ..Self::new(name, required, FieldType::String)
        }
    }

    /// An integer field bounded by `range`.
    pub fn integer(name: &'static str, required: bool, range: Range) -> Self {
        Self {
            min: Some(range.min as f64),
            max: range.max.map(|max| max as f64),
            ..Self::new(name, required, FieldType::Integer)
        }
    }

    /// A decimal field bounded by `range`.
    pub fn decimal(name: &'static str, required: bool, range: Range) -> Self {
        Self {
            min: Some(range.min as f64),
            max: range.max.map(|max| max as f64),
            ..Self::new(name, required, FieldType::Decimal)
        }
    }

    pub fn boolean(name: &'static str, required: bool) -> Self {
        Self::new(name, required, FieldType::Boolean)
    }

    /// An optional array field whose elements follow `nested`.
    pub fn array(name: &'static str, nested: Level) -> Self {
        Self {
            nested: Some(nested),
            ..Self::new(name, false, FieldType::Array)
        }
    }
}

/// Inclusive numeric range. A missing `max` is unbounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Range {
    pub min: i64,
    #[serde(default)]
    pub max: Option<i64>,
}

impl Range {
    #[must_use]
    pub const fn new(min: i64, max: i64) -> Self {
        Self {
            min,
            max: Some(max),
        }
    }

    #[must_use]
    pub const fn at_least(min: i64) -> Self {
        Self { min, max: None }
    }
}

/// Id ranges that change whenever the host application adds pages,
/// dashboard types, setting types or action types.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchemaBounds {
    pub page_id: Range,
    pub dashboard_type: Range,
    pub setting_type: Range,
    pub action_type: Range,
}

impl Default for SchemaBounds {
    fn default() -> Self {
        Self {
            page_id: Range::new(1, 21),
            dashboard_type: Range::new(1, 6),
            setting_type: Range::new(1, 12),
            action_type: Range::new(1, 2),
        }
    }
}

/// The full set of rule tables, keyed by level.
#[derive(Debug, Clone)]
pub struct Schema {
    version: u32,
    bounds: SchemaBounds,
    levels: HashMap<Level, Vec<SchemaRule>>,
}

impl Schema {
    /// Build the rule tables from the given bounds.
    #[must_use]
    pub fn new(bounds: SchemaBounds) -> Self {
        let levels = Level::ALL
            .iter()
            .map(|&level| (level, build_rules(level, &bounds)))
            .collect();

        Self {
            version: SCHEMA_VERSION,
            bounds,
            levels,
        }
    }

    /// Ordered rules for a level.
    #[must_use]
    pub fn rules_for(&self, level: Level) -> &[SchemaRule] {
        self.levels.get(&level).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Look up the rule for a single field.
    #[must_use]
    pub fn rule(&self, level: Level, name: &str) -> Option<&SchemaRule> {
        self.rules_for(level).iter().find(|rule| rule.name == name)
    }

    #[must_use]
    pub fn version(&self) -> u32 {
        self.version
    }

    #[must_use]
    pub fn bounds(&self) -> &SchemaBounds {
        &self.bounds
    }
}

impl Default for Schema {
    fn default() -> Self {
        Self::new(SchemaBounds::default())
    }
}

fn build_rules(level: Level, bounds: &SchemaBounds) -> Vec<SchemaRule> {
    use SchemaRule as R;

    match level {
        Level::Root => vec![
            R::string("guid", true, Some(64)),
            R::string("name", true, Some(255)),
            R::string("caption", false, Some(255)),
            R::string("summary", false, Some(255)),
            R::string("description", false, None),
            R::string("productSummary", false, Some(255)),
            R::string("productDescription", false, None),
            R::string("author", false, Some(128)),
            R::string("license", false, None),
            R::string("copyright", false, Some(128)),
            R::string("url", false, Some(256)),
            R::string("icon", false, None),
            R::decimal("version", true, Range::at_least(0)),
            R::array("menus", Level::Menu),
            R::array("pageContents", Level::PageContent),
            R::array("pageColumns", Level::PageColumn),
            R::array("dashboards", Level::Dashboard),
            R::array("settingGroups", Level::SettingGroup),
            R::array("settings", Level::Setting),
            R::array("productSettings", Level::ProductSetting),
        ],
        Level::Menu => vec![
            R::integer("pageId", true, bounds.page_id),
            R::string("caption", true, Some(255)),
            R::string("icon", false, Some(255)),
            R::boolean("isActive", false),
            R::array("entries", Level::MenuEntry),
        ],
        Level::MenuEntry => vec![
            R::string("name", true, Some(50)),
            R::string("caption", true, Some(128)),
            R::string("tooltip", false, Some(255)),
            R::string("icon", false, Some(255)),
            R::integer("actionTypeId", true, bounds.action_type),
            R::string("action", true, Some(255)),
            R::boolean("isActive", false),
        ],
        Level::PageContent => vec![
            R::integer("pageId", true, bounds.page_id),
            R::string("name", true, Some(128)),
            R::string("code", true, None),
            R::string("css", false, None),
        ],
        Level::PageColumn => vec![
            R::integer("pageId", true, bounds.page_id),
            R::string("name", true, Some(50)),
            R::string("caption", true, Some(50)),
            R::string("template", true, None),
        ],
        Level::Dashboard => vec![
            R::integer("dashboardTypeId", false, bounds.dashboard_type),
            R::string("name", true, Some(128)),
            R::boolean("isActive", false),
            R::string("description", false, None),
            R::string("code", false, None),
        ],
        Level::SettingGroup => vec![
            R::string("name", true, Some(50)),
            R::string("caption", true, Some(255)),
            R::string("description", false, None),
        ],
        Level::Setting => setting_rules(bounds),
        Level::ProductSetting => {
            let mut rules = setting_rules(bounds);
            rules.push(R::integer("artifactTypeId", false, Range::at_least(-1000)));
            rules
        }
    }
}

fn setting_rules(bounds: &SchemaBounds) -> Vec<SchemaRule> {
    use SchemaRule as R;

    vec![
        R::integer("settingTypeId", true, bounds.setting_type),
        R::string("name", true, Some(255)),
        R::string("caption", true, Some(50)),
        R::string("placeholder", false, Some(255)),
        R::string("tooltip", false, Some(255)),
        R::boolean("isSecure", false),
        R::integer("position", false, Range::at_least(1)),
        R::string("settingGroup", false, Some(50)),
    ]
}
