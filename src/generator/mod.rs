//! Static-site generator: a pure function from (catalog, branding options)
//! to one self-contained HTML document that renders the catalog and drives a
//! WebXR viewer at runtime. The generator never mutates the catalog and its
//! output depends on nothing but its two arguments.

pub mod options;
pub mod template;
pub mod texts;

pub use options::GeneratorOptions;
pub use texts::TextBundle;

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;
use thiserror::Error;

use crate::models::{Catalog, Category, CategoryKey, Experience};
use template::{escape_html, fill, json_for_script};

/// Theme color used when a candidate string fails validation.
pub const FALLBACK_COLOR: &str = "#6366f1";

static HEX_COLOR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^#([A-Fa-f0-9]{6}|[A-Fa-f0-9]{3})$").unwrap());

/// Accepts only strict 3- or 6-digit hex colors; anything else becomes the
/// fallback. The editor preview and the generator share this one definition
/// so they can never disagree on the rendered theme.
pub fn validate_color(color: &str) -> &str {
    if HEX_COLOR.is_match(color) {
        color
    } else {
        FALLBACK_COLOR
    }
}

#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("catalog is malformed: {reason}")]
    MalformedCatalog { reason: String },
}

/// Generates the complete standalone document for the catalog.
pub fn generate(catalog: &Catalog, options: &GeneratorOptions) -> Result<String, GenerationError> {
    validate_catalog(catalog)?;

    let texts = texts::bundle_for(&options.language);
    let color = validate_color(&options.primary_color);
    let title = escape_html(&options.title);

    let app_data = serde_json::to_string(catalog)
        .map_err(|e| GenerationError::MalformedCatalog {
            reason: e.to_string(),
        })?;

    let mut out = String::with_capacity(32 * 1024);

    out.push_str("<!DOCTYPE html>\n");
    out.push_str(&format!(
        "<html lang=\"{}\">\n",
        escape_html(&options.language)
    ));
    out.push_str("<head>\n");
    out.push_str("  <meta charset=\"UTF-8\">\n");
    out.push_str("  <meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n");
    out.push_str(&format!("  <title>{}</title>\n", title));
    out.push_str("  <style>\n");
    out.push_str(&fill(template::STYLE_SHEET, &[("@@PRIMARY@@", color)]));
    out.push_str("  </style>\n");
    out.push_str(template::RUNTIME_SCRIPT_TAGS);
    out.push_str("</head>\n");
    out.push_str("<body>\n");
    out.push_str("  <header>\n");
    out.push_str(&format!("    <h1>{}</h1>\n", title));
    out.push_str("  </header>\n\n");

    out.push_str("  <div class=\"container\">\n");
    render_tabs(&mut out, catalog, texts);
    render_panels(&mut out, catalog, options, texts);
    out.push_str("  </div>\n\n");

    // Shared viewer surface for AR/VR/3D sessions
    out.push_str("  <!-- WebXR View -->\n");
    out.push_str("  <div class=\"webxr-view\">\n");
    out.push_str("    <canvas class=\"webxr-canvas\"></canvas>\n");
    out.push_str("    <div class=\"webxr-buttons\">\n");
    out.push_str(&format!(
        "      <button class=\"btn btn-primary exit-xr\">{}</button>\n",
        escape_html(texts.back)
    ));
    out.push_str("    </div>\n");
    out.push_str("  </div>\n");

    if options.include_loading_screen {
        out.push_str("\n  <!-- Loading Screen -->\n");
        out.push_str("  <div class=\"loading-screen\">\n");
        out.push_str("    <div class=\"loader\"></div>\n");
        out.push_str(&format!("    <p>{}</p>\n", escape_html(texts.loading)));
        out.push_str("  </div>\n");
    }

    out.push_str("\n  <script>\n");
    let (loading_decl, loading_hide) = if options.include_loading_screen {
        (template::LOADING_DECL, template::LOADING_HIDE)
    } else {
        ("", "")
    };
    // Fixed label tokens first; the catalog literal is spliced in last so a
    // token marker appearing in catalog text stays literal instead of being
    // expanded.
    let runtime = fill(
        template::RUNTIME_JS,
        &[
            ("@@AR_SUPPORT@@", texts.ar_support),
            ("@@VR_SUPPORT@@", texts.vr_support),
            ("@@LOADING_3D@@", texts.loading_3d),
            ("@@LOADING_DECL@@", loading_decl),
            ("@@LOADING_HIDE@@", loading_hide),
        ],
    );
    out.push_str(&runtime.replace("@@APP_DATA@@", &json_for_script(&app_data)));
    out.push_str("  </script>\n");
    out.push_str("</body>\n");
    out.push_str("</html>\n");

    Ok(out)
}

/// Structural checks that must hold before iteration-driven rendering makes
/// sense: ids present and unique across the whole catalog, type sets
/// non-empty.
fn validate_catalog(catalog: &Catalog) -> Result<(), GenerationError> {
    let mut seen_ids = HashSet::new();

    for (key, category) in catalog.menu.entries() {
        for experience in &category.experiences {
            if experience.id.is_empty() {
                return Err(GenerationError::MalformedCatalog {
                    reason: format!("experience without id in category '{}'", key),
                });
            }
            if !seen_ids.insert(experience.id.as_str()) {
                return Err(GenerationError::MalformedCatalog {
                    reason: format!("duplicate experience id '{}'", experience.id),
                });
            }
            if experience.experience_types.is_empty() {
                return Err(GenerationError::MalformedCatalog {
                    reason: format!("experience '{}' has no experience types", experience.id),
                });
            }
        }
    }

    Ok(())
}

/// Tab labels come from the text bundle, not the catalog, so the generated
/// app is fully localized even though the stored category titles are fixed.
fn render_tabs(out: &mut String, catalog: &Catalog, texts: &TextBundle) {
    out.push_str("    <div class=\"tabs\">\n");
    for (key, _) in catalog.menu.entries() {
        let label = match key {
            CategoryKey::Ar => texts.ar,
            CategoryKey::Mr => texts.mr,
            CategoryKey::Vr => texts.vr,
        };
        out.push_str(&format!(
            "      <div class=\"tab\" data-tab=\"{}\">{}</div>\n",
            key,
            escape_html(label)
        ));
    }
    out.push_str("    </div>\n\n");
}

fn render_panels(
    out: &mut String,
    catalog: &Catalog,
    options: &GeneratorOptions,
    texts: &TextBundle,
) {
    out.push_str("    <div class=\"content\">\n");
    for (key, category) in catalog.menu.entries() {
        render_category_panel(out, key, category, options, texts);
    }
    out.push_str("    </div>\n");
}

fn render_category_panel(
    out: &mut String,
    key: CategoryKey,
    category: &Category,
    options: &GeneratorOptions,
    texts: &TextBundle,
) {
    out.push_str(&format!(
        "      <div class=\"tab-content\" data-content=\"{}\">\n",
        key
    ));
    out.push_str(&format!(
        "        <div class=\"{}\">\n",
        options.menu_style.css_class()
    ));

    if category.experiences.is_empty() {
        out.push_str(&format!(
            "          <div class=\"empty-state\">{}</div>\n",
            escape_html(texts.no_experiences)
        ));
    } else {
        for experience in &category.experiences {
            render_card(out, experience, texts);
        }
    }

    out.push_str("        </div>\n");
    out.push_str("      </div>\n");
}

fn render_card(out: &mut String, experience: &Experience, texts: &TextBundle) {
    let id = escape_html(&experience.id);
    let thumbnail = if experience.thumbnail_url.is_empty() {
        template::PLACEHOLDER_THUMBNAIL.to_string()
    } else {
        escape_html(&experience.thumbnail_url)
    };

    out.push_str(&format!(
        "          <div class=\"card\" data-experience-id=\"{}\">\n",
        id
    ));
    out.push_str(&format!(
        "            <div class=\"card-img\" style=\"background-image: url('{}')\">",
        thumbnail
    ));
    if experience.is_external {
        out.push_str(template::EXTERNAL_BADGE_SVG);
    }
    out.push_str("</div>\n");

    out.push_str("            <div class=\"card-content\">\n");
    out.push_str(&format!(
        "              <h3 class=\"card-title\">{}</h3>\n",
        escape_html(&experience.title)
    ));
    out.push_str(&format!(
        "              <p class=\"card-desc\">{}</p>\n",
        escape_html(&experience.description)
    ));

    out.push_str("              <div class=\"card-tags\">\n");
    for ty in &experience.experience_types {
        out.push_str(&format!(
            "                <span class=\"tag\">{}</span>\n",
            ty.label()
        ));
    }
    if experience.is_external {
        out.push_str(&format!(
            "                <span class=\"tag tag-external\">{}</span>\n",
            escape_html(texts.external)
        ));
    }
    out.push_str("              </div>\n");

    out.push_str("              <div class=\"card-cta\">\n");
    out.push_str("                ");
    out.push_str(&card_action(experience, texts));
    out.push('\n');
    out.push_str("              </div>\n");
    out.push_str("            </div>\n");
    out.push_str("          </div>\n");
}

/// Primary card action, by fixed precedence: external link, then AR entry,
/// then VR entry, then the generic 3D view.
fn card_action(experience: &Experience, texts: &TextBundle) -> String {
    let id = escape_html(&experience.id);

    if experience.is_external {
        format!(
            "<a href=\"{}\" target=\"_blank\" class=\"btn btn-primary btn-block\">{}</a>",
            escape_html(&experience.external_url),
            escape_html(texts.external)
        )
    } else if experience.experience_types.contains(&CategoryKey::Ar) {
        format!(
            "<button class=\"btn btn-primary btn-block start-ar\" data-id=\"{}\">{}</button>",
            id,
            escape_html(texts.enter_ar)
        )
    } else if experience.experience_types.contains(&CategoryKey::Vr) {
        format!(
            "<button class=\"btn btn-primary btn-block start-vr\" data-id=\"{}\">{}</button>",
            id,
            escape_html(texts.enter_vr)
        )
    } else {
        format!(
            "<button class=\"btn btn-primary btn-block view-3d\" data-id=\"{}\">{}</button>",
            id,
            escape_html(texts.start)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Catalog;
    use super::options::MenuStyle;

    fn catalog_with_one(key: CategoryKey) -> (Catalog, String) {
        let mut catalog = Catalog::new();
        let id = catalog.add_experience(key);
        (catalog, id)
    }

    #[test]
    fn test_color_validation_table() {
        assert_eq!(validate_color("#fff"), "#fff");
        assert_eq!(validate_color("#6366f1"), "#6366f1");
        assert_eq!(validate_color("#ABC123"), "#ABC123");
        assert_eq!(validate_color("red"), FALLBACK_COLOR);
        assert_eq!(validate_color("#12"), FALLBACK_COLOR);
        assert_eq!(validate_color("#gggggg"), FALLBACK_COLOR);
        assert_eq!(validate_color("#12345"), FALLBACK_COLOR);
        assert_eq!(validate_color(""), FALLBACK_COLOR);
    }

    #[test]
    fn test_generation_is_deterministic() {
        let (catalog, _) = catalog_with_one(CategoryKey::Ar);
        let options = GeneratorOptions::default();

        let first = generate(&catalog, &options).unwrap();
        let second = generate(&catalog, &options).unwrap();
        assert_eq!(first, second);
    }

    // The runtime JS wires up .start-ar/.start-vr/.view-3d handlers
    // unconditionally, so action assertions must target the card button
    // markup, not the whole document.
    const AR_BUTTON: &str = "class=\"btn btn-primary btn-block start-ar\"";
    const VR_BUTTON: &str = "class=\"btn btn-primary btn-block start-vr\"";
    const VIEW_3D_BUTTON: &str = "class=\"btn btn-primary btn-block view-3d\"";

    #[test]
    fn test_external_action_wins_over_ar() {
        let (mut catalog, id) = catalog_with_one(CategoryKey::Ar);
        catalog.update_field(&id, "isExternal", "true");
        catalog.update_field(&id, "externalUrl", "https://example.com/xr");

        let html = generate(&catalog, &GeneratorOptions::default()).unwrap();
        assert!(html.contains("href=\"https://example.com/xr\""));
        assert!(!html.contains(AR_BUTTON));
    }

    #[test]
    fn test_action_precedence_ar_then_vr_then_3d() {
        let (catalog, _) = catalog_with_one(CategoryKey::Ar);
        let html = generate(&catalog, &GeneratorOptions::default()).unwrap();
        assert_eq!(html.matches(AR_BUTTON).count(), 1);

        let (mut catalog, id) = catalog_with_one(CategoryKey::Vr);
        catalog.toggle_experience_type(&id, CategoryKey::Mr);
        let html = generate(&catalog, &GeneratorOptions::default()).unwrap();
        assert_eq!(html.matches(VR_BUTTON).count(), 1);
        assert!(!html.contains(AR_BUTTON));

        let (catalog, _) = catalog_with_one(CategoryKey::Mr);
        let html = generate(&catalog, &GeneratorOptions::default()).unwrap();
        assert_eq!(html.matches(VIEW_3D_BUTTON).count(), 1);
        assert!(!html.contains(AR_BUTTON));
        assert!(!html.contains(VR_BUTTON));
    }

    #[test]
    fn test_empty_category_renders_empty_state_and_no_cards() {
        let catalog = Catalog::new();
        let options = GeneratorOptions {
            language: String::from("en"),
            ..GeneratorOptions::default()
        };

        let html = generate(&catalog, &options).unwrap();
        assert_eq!(
            html.matches("No experiences available in this category").count(),
            3
        );
        assert!(!html.contains("class=\"card\""));
    }

    #[test]
    fn test_invalid_color_falls_back_in_output() {
        let (catalog, _) = catalog_with_one(CategoryKey::Ar);
        let options = GeneratorOptions {
            primary_color: String::from("blurple"),
            ..GeneratorOptions::default()
        };

        let html = generate(&catalog, &options).unwrap();
        assert!(html.contains("--primary-color: #6366f1;"));
    }

    #[test]
    fn test_language_selects_bundle_and_lang_attribute() {
        let (catalog, _) = catalog_with_one(CategoryKey::Ar);

        let es = generate(&catalog, &GeneratorOptions::default()).unwrap();
        assert!(es.contains("<html lang=\"es\">"));
        assert!(es.contains("Entrar en AR"));

        let options = GeneratorOptions {
            language: String::from("en"),
            ..GeneratorOptions::default()
        };
        let en = generate(&catalog, &options).unwrap();
        assert!(en.contains("<html lang=\"en\">"));
        assert!(en.contains("Enter AR"));
    }

    #[test]
    fn test_loading_screen_toggle() {
        let (catalog, _) = catalog_with_one(CategoryKey::Ar);

        let with = generate(&catalog, &GeneratorOptions::default()).unwrap();
        assert!(with.contains("<div class=\"loading-screen\">"));
        assert!(with.contains("}, 1500);"));

        // The .loading-screen CSS rules stay in the stylesheet either way;
        // only the element and its timed-hide hook come and go.
        let options = GeneratorOptions {
            include_loading_screen: false,
            ..GeneratorOptions::default()
        };
        let without = generate(&catalog, &options).unwrap();
        assert!(!without.contains("<div class=\"loading-screen\">"));
        assert!(!without.contains("}, 1500);"));
    }

    #[test]
    fn test_menu_style_selects_layout_class() {
        let (catalog, _) = catalog_with_one(CategoryKey::Ar);

        for (style, class) in [
            (MenuStyle::Grid, "class=\"grid-view\""),
            (MenuStyle::List, "class=\"list-view\""),
            (MenuStyle::Carousel, "class=\"carousel-view\""),
        ] {
            let options = GeneratorOptions {
                menu_style: style,
                ..GeneratorOptions::default()
            };
            let html = generate(&catalog, &options).unwrap();
            assert!(html.contains(class), "missing {} for {:?}", class, style);
        }
    }

    #[test]
    fn test_user_text_is_escaped_everywhere() {
        let (mut catalog, id) = catalog_with_one(CategoryKey::Ar);
        catalog.update_field(&id, "title", "<script>alert('xss')</script>");
        catalog.update_field(&id, "description", "a & b < c");

        let options = GeneratorOptions {
            title: String::from("\"Quoted\" & <Titled>"),
            ..GeneratorOptions::default()
        };

        let html = generate(&catalog, &options).unwrap();
        assert!(html.contains("&lt;script&gt;alert(&#39;xss&#39;)&lt;/script&gt;"));
        assert!(html.contains("a &amp; b &lt; c"));
        assert!(html.contains("<title>&quot;Quoted&quot; &amp; &lt;Titled&gt;</title>"));
        // The embedded catalog literal never closes the script element early
        let script_start = html.find("const appData").unwrap();
        let script_body = &html[script_start..html.find("// DOM references").unwrap()];
        assert!(!script_body.contains("</script"));
    }

    #[test]
    fn test_token_markers_in_catalog_text_stay_literal() {
        let (mut catalog, id) = catalog_with_one(CategoryKey::Ar);
        catalog.update_field(&id, "title", "@@AR_SUPPORT@@");
        catalog.update_field(&id, "description", "see @@LOADING_DECL@@");

        let html = generate(&catalog, &GeneratorOptions::default()).unwrap();
        assert!(html.contains(r#""title":"@@AR_SUPPORT@@""#));
        assert!(html.contains(r#""description":"see @@LOADING_DECL@@""#));
        assert!(!html.contains(r#""title":"Tu dispositivo no soporta AR""#));
    }

    #[test]
    fn test_card_markup_details() {
        let (mut catalog, id) = catalog_with_one(CategoryKey::Ar);
        catalog.update_field(&id, "thumbnailUrl", "");
        catalog.toggle_experience_type(&id, CategoryKey::Mr);

        let html = generate(&catalog, &GeneratorOptions::default()).unwrap();
        assert!(html.contains(template::PLACEHOLDER_THUMBNAIL));
        assert!(html.contains("<span class=\"tag\">AR</span>"));
        assert!(html.contains("<span class=\"tag\">MR</span>"));
        assert!(html.contains(&format!("data-experience-id=\"{}\"", id)));
    }

    #[test]
    fn test_malformed_catalog_is_rejected() {
        let (mut catalog, id) = catalog_with_one(CategoryKey::Ar);
        catalog
            .find_experience_mut(&id)
            .unwrap()
            .experience_types
            .clear();
        assert!(matches!(
            generate(&catalog, &GeneratorOptions::default()),
            Err(GenerationError::MalformedCatalog { .. })
        ));

        let (mut catalog, id) = catalog_with_one(CategoryKey::Ar);
        catalog.find_experience_mut(&id).unwrap().id = String::new();
        assert!(generate(&catalog, &GeneratorOptions::default()).is_err());

        let mut catalog = Catalog::new();
        let a = catalog.add_experience(CategoryKey::Ar);
        let b = catalog.add_experience(CategoryKey::Vr);
        let duplicate = catalog.find_experience(&a).unwrap().1.id.clone();
        catalog.find_experience_mut(&b).unwrap().id = duplicate;
        assert!(generate(&catalog, &GeneratorOptions::default()).is_err());
    }

    #[test]
    fn test_runtime_contract_is_embedded() {
        let (catalog, _) = catalog_with_one(CategoryKey::Ar);
        let html = generate(&catalog, &GeneratorOptions::default()).unwrap();

        // Session capabilities and teardown the generated app relies on
        assert!(html.contains("requiredFeatures: ['hit-test']"));
        assert!(html.contains("optionalFeatures: ['local-floor', 'bounded-floor']"));
        assert!(html.contains("model.scale.multiplyScalar(5 / maxDim)"));
        assert!(html.contains("function exitXR()"));
        assert!(html.contains("three@0.157.0"));
        assert!(html.contains("const appData = {\"menu\""));
    }
}
