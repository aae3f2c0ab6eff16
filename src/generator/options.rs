use std::fmt;
use std::str::FromStr;

/// Visual layout of the generated catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuStyle {
    Grid,
    List,
    Carousel,
}

impl MenuStyle {
    pub fn as_str(&self) -> &'static str {
        match self {
            MenuStyle::Grid => "grid",
            MenuStyle::List => "list",
            MenuStyle::Carousel => "carousel",
        }
    }

    /// CSS class selecting the layout in the generated stylesheet.
    pub fn css_class(&self) -> &'static str {
        match self {
            MenuStyle::Grid => "grid-view",
            MenuStyle::List => "list-view",
            MenuStyle::Carousel => "carousel-view",
        }
    }

    pub fn next(&self) -> MenuStyle {
        match self {
            MenuStyle::Grid => MenuStyle::List,
            MenuStyle::List => MenuStyle::Carousel,
            MenuStyle::Carousel => MenuStyle::Grid,
        }
    }
}

impl fmt::Display for MenuStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MenuStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "grid" => Ok(MenuStyle::Grid),
            "list" => Ok(MenuStyle::List),
            "carousel" => Ok(MenuStyle::Carousel),
            other => Err(format!(
                "unknown menu style '{}' (expected grid, list or carousel)",
                other
            )),
        }
    }
}

/// Branding options steering generated-output look, text and layout.
///
/// `description` is carried but never emitted, and `generate_full_project`
/// is reserved for a multi-file output mode that does not exist yet; both
/// are kept so option records from the web editor survive round trips.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratorOptions {
    pub title: String,
    pub description: String,
    pub primary_color: String,
    pub language: String,
    pub menu_style: MenuStyle,
    pub include_loading_screen: bool,
    pub generate_full_project: bool,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self {
            title: String::from("Mi Aplicación WebXR"),
            description: String::from("Aplicación WebXR generada con xrforge"),
            primary_color: String::from("#6366f1"),
            language: String::from("es"),
            menu_style: MenuStyle::Grid,
            include_loading_screen: true,
            generate_full_project: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_menu_style_parse() {
        assert_eq!("grid".parse::<MenuStyle>().unwrap(), MenuStyle::Grid);
        assert_eq!("CAROUSEL".parse::<MenuStyle>().unwrap(), MenuStyle::Carousel);
        assert!("masonry".parse::<MenuStyle>().is_err());
    }

    #[test]
    fn test_menu_style_cycles_through_all_variants() {
        let mut style = MenuStyle::Grid;
        for expected in [MenuStyle::List, MenuStyle::Carousel, MenuStyle::Grid] {
            style = style.next();
            assert_eq!(style, expected);
        }
    }
}
