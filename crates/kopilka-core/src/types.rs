//! Basic types for categories: direction, icon and color

use serde::{Deserialize, Serialize};

/// Category type enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CategoryType {
    /// Money coming in (salary, freelance)
    Income,
    /// Money going out (groceries, transport)
    Expense,
}

impl Default for CategoryType {
    fn default() -> Self {
        CategoryType::Expense
    }
}

impl CategoryType {
    /// Form label ("Доход" / "Расход")
    pub fn label(&self) -> &'static str {
        match self {
            CategoryType::Income => "Доход",
            CategoryType::Expense => "Расход",
        }
    }

    /// Section heading ("Доходы" / "Расходы")
    pub fn heading(&self) -> &'static str {
        match self {
            CategoryType::Income => "Доходы",
            CategoryType::Expense => "Расходы",
        }
    }
}

impl std::str::FromStr for CategoryType {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "income" => Ok(CategoryType::Income),
            "expense" => Ok(CategoryType::Expense),
            _ => Err(format!("Invalid category type: {}", s)),
        }
    }
}

impl std::fmt::Display for CategoryType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CategoryType::Income => write!(f, "income"),
            CategoryType::Expense => write!(f, "expense"),
        }
    }
}

/// Symbolic icon of a category
///
/// Names match the icon set used by the page templates. `CircleAlert` is
/// never offered in the picker, it only stands in for unknown names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CategoryIcon {
    Briefcase,
    Code,
    ShoppingCart,
    Car,
    Smile,
    Home,
    Coffee,
    Heart,
    Gift,
    Plane,
    Book,
    Music,
    Film,
    Utensils,
    CircleAlert,
}

impl CategoryIcon {
    /// Icons offered in the category form, in picker order
    pub const SELECTABLE: [CategoryIcon; 14] = [
        CategoryIcon::Briefcase,
        CategoryIcon::Code,
        CategoryIcon::ShoppingCart,
        CategoryIcon::Car,
        CategoryIcon::Smile,
        CategoryIcon::Home,
        CategoryIcon::Coffee,
        CategoryIcon::Heart,
        CategoryIcon::Gift,
        CategoryIcon::Plane,
        CategoryIcon::Book,
        CategoryIcon::Music,
        CategoryIcon::Film,
        CategoryIcon::Utensils,
    ];

    pub const FALLBACK: CategoryIcon = CategoryIcon::CircleAlert;

    /// Icon set name
    pub fn name(&self) -> &'static str {
        match self {
            CategoryIcon::Briefcase => "Briefcase",
            CategoryIcon::Code => "Code",
            CategoryIcon::ShoppingCart => "ShoppingCart",
            CategoryIcon::Car => "Car",
            CategoryIcon::Smile => "Smile",
            CategoryIcon::Home => "Home",
            CategoryIcon::Coffee => "Coffee",
            CategoryIcon::Heart => "Heart",
            CategoryIcon::Gift => "Gift",
            CategoryIcon::Plane => "Plane",
            CategoryIcon::Book => "Book",
            CategoryIcon::Music => "Music",
            CategoryIcon::Film => "Film",
            CategoryIcon::Utensils => "Utensils",
            CategoryIcon::CircleAlert => "CircleAlert",
        }
    }

    /// Emoji glyph used by the HTML views
    pub fn glyph(&self) -> &'static str {
        match self {
            CategoryIcon::Briefcase => "💼",
            CategoryIcon::Code => "💻",
            CategoryIcon::ShoppingCart => "🛒",
            CategoryIcon::Car => "🚗",
            CategoryIcon::Smile => "😊",
            CategoryIcon::Home => "🏠",
            CategoryIcon::Coffee => "☕",
            CategoryIcon::Heart => "❤️",
            CategoryIcon::Gift => "🎁",
            CategoryIcon::Plane => "✈️",
            CategoryIcon::Book => "📖",
            CategoryIcon::Music => "🎵",
            CategoryIcon::Film => "🎬",
            CategoryIcon::Utensils => "🍴",
            CategoryIcon::CircleAlert => "⚠️",
        }
    }

    /// Resolve an untrusted icon name, falling back to `CircleAlert`
    pub fn resolve(name: &str) -> Self {
        name.parse().unwrap_or(Self::FALLBACK)
    }
}

impl Default for CategoryIcon {
    fn default() -> Self {
        CategoryIcon::ShoppingCart
    }
}

impl std::str::FromStr for CategoryIcon {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Self::SELECTABLE
            .iter()
            .chain(std::iter::once(&Self::FALLBACK))
            .find(|icon| icon.name().eq_ignore_ascii_case(trimmed))
            .copied()
            .ok_or_else(|| format!("Unknown icon: {}", s))
    }
}

impl std::fmt::Display for CategoryIcon {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Symbolic color token of a category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CategoryColor {
    Emerald,
    Blue,
    Orange,
    Purple,
    Pink,
    Rose,
    Gray,
}

impl CategoryColor {
    /// Colors offered in the category form, in picker order
    pub const SELECTABLE: [CategoryColor; 6] = [
        CategoryColor::Emerald,
        CategoryColor::Blue,
        CategoryColor::Orange,
        CategoryColor::Purple,
        CategoryColor::Pink,
        CategoryColor::Rose,
    ];

    /// Token name
    pub fn token(&self) -> &'static str {
        match self {
            CategoryColor::Emerald => "emerald",
            CategoryColor::Blue => "blue",
            CategoryColor::Orange => "orange",
            CategoryColor::Purple => "purple",
            CategoryColor::Pink => "pink",
            CategoryColor::Rose => "rose",
            CategoryColor::Gray => "gray",
        }
    }

    /// Russian label shown in the picker
    pub fn label(&self) -> &'static str {
        match self {
            CategoryColor::Emerald => "Зелёный",
            CategoryColor::Blue => "Синий",
            CategoryColor::Orange => "Оранжевый",
            CategoryColor::Purple => "Фиолетовый",
            CategoryColor::Pink => "Розовый",
            CategoryColor::Rose => "Красный",
            CategoryColor::Gray => "Серый",
        }
    }

    /// Text color class
    pub fn text_class(&self) -> String {
        match self {
            CategoryColor::Gray => "text-gray-700".to_string(),
            other => format!("text-{}-600", other.token()),
        }
    }

    /// Light background class for icon badges and summary cards
    pub fn bg_class(&self) -> String {
        format!("bg-{}-50", self.token())
    }

    /// Resolve an untrusted color token, falling back to `Gray`
    pub fn resolve(token: &str) -> Self {
        token.parse().unwrap_or(CategoryColor::Gray)
    }
}

impl Default for CategoryColor {
    fn default() -> Self {
        CategoryColor::Gray
    }
}

impl std::str::FromStr for CategoryColor {
    type Err = String;
    /// Accepts bare tokens ("emerald") and text classes ("text-emerald-600")
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_lowercase();
        let token = lowered
            .strip_prefix("text-")
            .map(|rest| rest.split('-').next().unwrap_or(rest))
            .unwrap_or(lowered.as_str());
        match token {
            "emerald" => Ok(CategoryColor::Emerald),
            "blue" => Ok(CategoryColor::Blue),
            "orange" => Ok(CategoryColor::Orange),
            "purple" => Ok(CategoryColor::Purple),
            "pink" => Ok(CategoryColor::Pink),
            "rose" => Ok(CategoryColor::Rose),
            "gray" => Ok(CategoryColor::Gray),
            _ => Err(format!("Unknown color: {}", s)),
        }
    }
}

impl std::fmt::Display for CategoryColor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.token())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_type_parse() {
        assert_eq!("income".parse::<CategoryType>().unwrap(), CategoryType::Income);
        assert_eq!("Expense".parse::<CategoryType>().unwrap(), CategoryType::Expense);
        assert!("transfer".parse::<CategoryType>().is_err());
        assert_eq!(CategoryType::Income.to_string(), "income");
    }

    #[test]
    fn test_icon_resolve() {
        assert_eq!(CategoryIcon::resolve("ShoppingCart"), CategoryIcon::ShoppingCart);
        assert_eq!(CategoryIcon::resolve("shoppingcart"), CategoryIcon::ShoppingCart);
        assert_eq!(CategoryIcon::resolve("Rocket"), CategoryIcon::CircleAlert);
        assert!("Rocket".parse::<CategoryIcon>().is_err());
        assert!(!CategoryIcon::SELECTABLE.contains(&CategoryIcon::CircleAlert));
    }

    #[test]
    fn test_icon_serde_uses_icon_names() {
        let json = serde_json::to_string(&CategoryIcon::ShoppingCart).unwrap();
        assert_eq!(json, "\"ShoppingCart\"");
    }

    #[test]
    fn test_color_resolve() {
        assert_eq!(CategoryColor::resolve("emerald"), CategoryColor::Emerald);
        assert_eq!(CategoryColor::resolve("text-rose-600"), CategoryColor::Rose);
        assert_eq!(CategoryColor::resolve("chartreuse"), CategoryColor::Gray);
        assert_eq!(CategoryColor::Orange.text_class(), "text-orange-600");
        assert_eq!(CategoryColor::Gray.text_class(), "text-gray-700");
        assert_eq!(CategoryColor::Orange.bg_class(), "bg-orange-50");
    }
}
