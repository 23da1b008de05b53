/// Inline style and layout data carried by elements
use serde::{Deserialize, Serialize};

/// Overflow behaviour of one axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Overflow {
    Visible,
    Hidden,
    Clip,
    Scroll,
    Auto,
}

impl Overflow {
    fn parse(value: &str) -> Option<Self> {
        match value {
            "visible" => Some(Overflow::Visible),
            "hidden" => Some(Overflow::Hidden),
            "clip" => Some(Overflow::Clip),
            "scroll" => Some(Overflow::Scroll),
            "auto" => Some(Overflow::Auto),
            _ => None,
        }
    }

    pub fn is_scrollable(&self) -> bool {
        matches!(self, Overflow::Scroll | Overflow::Auto)
    }
}

/// The subset of CSS that decides visibility and scrolling
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Style {
    pub display: Option<String>,
    pub visibility: Option<String>,
    pub opacity: Option<f64>,
    /// Pixels
    pub width: Option<f64>,
    /// Pixels
    pub height: Option<f64>,
    pub overflow: Option<Overflow>,
    pub overflow_x: Option<Overflow>,
    pub overflow_y: Option<Overflow>,
}

impl Style {
    /// Parse a `style` attribute; unknown or malformed declarations are ignored
    pub fn parse(declarations: &str) -> Self {
        let mut style = Style::default();

        for declaration in declarations.split(';') {
            let Some((property, value)) = declaration.split_once(':') else {
                continue;
            };
            let property = property.trim().to_ascii_lowercase();
            let value = value
                .trim()
                .trim_end_matches("!important")
                .trim()
                .to_ascii_lowercase();

            match property.as_str() {
                "display" => style.display = Some(value),
                "visibility" => style.visibility = Some(value),
                "opacity" => style.opacity = value.parse().ok(),
                "width" => style.width = parse_px(&value),
                "height" => style.height = parse_px(&value),
                "overflow" => {
                    // two-value shorthand sets x then y
                    let mut parts = value.split_whitespace().filter_map(Overflow::parse);
                    let x = parts.next();
                    let y = parts.next().or(x);
                    style.overflow = x.filter(|x| Some(*x) == y);
                    style.overflow_x = x;
                    style.overflow_y = y;
                }
                "overflow-x" => style.overflow_x = Overflow::parse(&value),
                "overflow-y" => style.overflow_y = Overflow::parse(&value),
                _ => {}
            }
        }

        style
    }

    pub fn overflow_x(&self) -> Overflow {
        self.overflow_x.or(self.overflow).unwrap_or(Overflow::Visible)
    }

    pub fn overflow_y(&self) -> Overflow {
        self.overflow_y.or(self.overflow).unwrap_or(Overflow::Visible)
    }

    /// Whether this style alone hides its element
    pub fn hides_element(&self) -> bool {
        let clipped = self.overflow_x() == Overflow::Hidden && self.overflow_y() == Overflow::Hidden;

        self.display.as_deref() == Some("none")
            || self.visibility.as_deref() == Some("hidden")
            || self.opacity == Some(0.0)
            || (clipped && (self.height == Some(0.0) || self.width == Some(0.0)))
    }
}

/// Top-level `(selector, declarations)` rules of a stylesheet.
/// Comments are stripped and at-rules such as `@media` are skipped whole.
pub fn stylesheet_rules(css: &str) -> Vec<(String, String)> {
    let css = strip_comments(css);
    let mut rules = Vec::new();
    let mut rest = css.as_str();

    while let Some(open) = rest.find('{') {
        // statements like `@import url(x);` end before the selector
        let prelude = rest[..open].rsplit(';').next().unwrap_or_default().trim();

        let mut depth = 0usize;
        let mut close = None;
        for (i, c) in rest[open..].char_indices() {
            match c {
                '{' => depth += 1,
                '}' => {
                    depth -= 1;
                    if depth == 0 {
                        close = Some(open + i);
                        break;
                    }
                }
                _ => {}
            }
        }
        let Some(close) = close else {
            break;
        };

        if !prelude.is_empty() && !prelude.starts_with('@') {
            rules.push((prelude.to_string(), rest[open + 1..close].trim().to_string()));
        }
        rest = &rest[close + 1..];
    }

    rules
}

fn strip_comments(css: &str) -> String {
    let mut out = String::with_capacity(css.len());
    let mut rest = css;
    while let Some(start) = rest.find("/*") {
        out.push_str(&rest[..start]);
        match rest[start + 2..].find("*/") {
            Some(end) => rest = &rest[start + 2 + end + 2..],
            None => return out,
        }
    }
    out.push_str(rest);
    out
}

fn parse_px(value: &str) -> Option<f64> {
    value.trim_end_matches("px").trim().parse().ok()
}

/// Bounding box in viewport coordinates
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    pub fn top(&self) -> f64 {
        self.y
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0.0 && self.height == 0.0
    }
}

/// Scroll state of a container
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ScrollMetrics {
    pub scroll_top: f64,
    pub scroll_height: f64,
    pub scroll_width: f64,
    pub client_height: f64,
    pub client_width: f64,
}

impl ScrollMetrics {
    /// Content larger than the visible client area
    pub fn has_overflowing_content(&self) -> bool {
        self.scroll_height > self.client_height || self.scroll_width > self.client_width
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hidden_declarations() {
        assert!(Style::parse("display: none").hides_element());
        assert!(Style::parse("color:red; visibility:hidden;").hides_element());
        assert!(Style::parse("opacity: 0").hides_element());
        assert!(Style::parse("HEIGHT: 0px; Overflow: hidden").hides_element());
        assert!(Style::parse("width:0;overflow:hidden !important").hides_element());
    }

    #[test]
    fn test_parse_visible_declarations() {
        assert!(!Style::parse("").hides_element());
        assert!(!Style::parse("opacity: 0.5").hides_element());
        assert!(!Style::parse("height: 0px").hides_element());
        assert!(!Style::parse("height: 0px; overflow: hidden auto").hides_element());
        assert!(!Style::parse("garbage; :; display").hides_element());
    }

    #[test]
    fn test_stylesheet_rules() {
        let css = "/* hidden helpers */ .sr-only { display: none } \
                   @media print { .x { display: none } } \
                   @import url(a.css); #caps, .caps{overflow-y:auto}";
        let rules = stylesheet_rules(css);

        assert_eq!(
            rules,
            vec![
                (".sr-only".to_string(), "display: none".to_string()),
                ("#caps, .caps".to_string(), "overflow-y:auto".to_string()),
            ]
        );
        assert!(stylesheet_rules(".open { display: none").is_empty());
    }

    #[test]
    fn test_overflow_axes() {
        let style = Style::parse("overflow: hidden; overflow-y: auto");
        assert_eq!(style.overflow_x(), Overflow::Hidden);
        assert_eq!(style.overflow_y(), Overflow::Auto);
        assert!(style.overflow_y().is_scrollable());

        let pair = Style::parse("overflow: scroll hidden");
        assert_eq!(pair.overflow_x(), Overflow::Scroll);
        assert_eq!(pair.overflow_y(), Overflow::Hidden);
        assert_eq!(pair.overflow, None);
    }
}
