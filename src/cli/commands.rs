use crate::generator::{self, GeneratorOptions};
use crate::models::{Catalog, CategoryKey, Experience, StorageManager, export};
use colored::Colorize;
use std::error::Error;
use std::path::Path;

/// Lists the catalog, optionally restricted to a single category.
pub fn list_catalog(category: Option<&str>) -> Result<(), Box<dyn Error>> {
    let storage = StorageManager::new()?;
    let (catalog, _) = storage.load_catalog();

    let keys: Vec<CategoryKey> = match category {
        Some(raw) => match CategoryKey::parse(raw) {
            Some(key) => vec![key],
            None => {
                println!("{}  Unknown category: {}", "┃".bright_magenta(), raw);
                println!(
                    "{}  Expected one of: ar, mr, vr",
                    "┃".bright_magenta()
                );
                return Ok(());
            }
        },
        None => CategoryKey::ALL.to_vec(),
    };

    for key in keys {
        let category = catalog.category(key);
        println!(
            "{}  {} ({})",
            "┃".bright_magenta(),
            category.title.bright_green().bold(),
            category.experiences.len()
        );

        if category.experiences.is_empty() {
            println!("{}    (no experiences)", "┃".bright_magenta());
            continue;
        }

        for (idx, experience) in category.experiences.iter().enumerate() {
            let types: Vec<&str> = experience
                .experience_types
                .iter()
                .map(|t| t.as_str())
                .collect();
            let marker = if experience.is_external { " ↗" } else { "" };
            println!(
                "{}    {}. {} {} [{}]{}",
                "┃".bright_magenta(),
                (idx + 1).to_string().yellow(),
                experience.title.bright_white(),
                experience.id.dimmed(),
                types.join(", "),
                marker.bright_blue()
            );
        }
    }

    println!(
        "{}  {} experiences total",
        "┃".bright_magenta(),
        catalog.total_experiences()
    );

    Ok(())
}

/// Shows a single experience by ID or (partial) title.
pub fn show_experience(query: &str) -> Result<(), Box<dyn Error>> {
    let storage = StorageManager::new()?;
    let (catalog, _) = storage.load_catalog();

    if let Some(experience) = find_experience(&catalog, query) {
        display_experience(experience);
    } else {
        println!(
            "{}  No experience found matching: {}",
            "┃".bright_magenta(),
            query
        );
        println!("{}  Available experiences:", "┃".bright_magenta());
        println!("{}", "─".repeat(60).bright_magenta());

        for (key, category) in catalog.menu.entries() {
            for experience in &category.experiences {
                println!(
                    "{}  [{}] {}",
                    "┃".bright_magenta(),
                    key.as_str().yellow(),
                    experience.title.bright_white()
                );
            }
        }
    }

    Ok(())
}

/// ID match first, then exact title, then partial title.
fn find_experience<'a>(catalog: &'a Catalog, query: &str) -> Option<&'a Experience> {
    if let Some((_, found)) = catalog.find_experience(query) {
        return Some(found);
    }

    let needle = query.to_lowercase();
    let all = || {
        catalog
            .menu
            .entries()
            .into_iter()
            .flat_map(|(_, category)| category.experiences.iter())
    };

    all()
        .find(|e| e.title.to_lowercase() == needle)
        .or_else(|| all().find(|e| e.title.to_lowercase().contains(&needle)))
}

fn display_experience(experience: &Experience) {
    let types: Vec<&str> = experience
        .experience_types
        .iter()
        .map(|t| t.as_str())
        .collect();

    println!(
        "{}  {} {}",
        "┃".bright_magenta(),
        "EXPERIENCE".bright_green().bold(),
        experience.title.bright_white().bold()
    );
    println!("{}", "─".repeat(60).bright_magenta());
    println!(
        "{}  {:<14} {}",
        "┃".bright_magenta(),
        "ID:".bright_yellow(),
        experience.id
    );
    println!(
        "{}  {:<14} {}",
        "┃".bright_magenta(),
        "Types:".bright_yellow(),
        types.join(", ")
    );
    println!(
        "{}  {:<14} {}",
        "┃".bright_magenta(),
        "Description:".bright_yellow(),
        experience.description
    );
    println!(
        "{}  {:<14} {}",
        "┃".bright_magenta(),
        "Thumbnail:".bright_yellow(),
        value_or_dash(&experience.thumbnail_url)
    );
    if experience.is_external {
        println!(
            "{}  {:<14} {}",
            "┃".bright_magenta(),
            "External URL:".bright_yellow(),
            value_or_dash(&experience.external_url)
        );
    } else {
        println!(
            "{}  {:<14} {}",
            "┃".bright_magenta(),
            "Model:".bright_yellow(),
            value_or_dash(&experience.model_url)
        );
        println!(
            "{}  {:<14} {} / {} / {}",
            "┃".bright_magenta(),
            "Transform:".bright_yellow(),
            format_vec(&experience.position),
            format_vec(&experience.rotation),
            format_vec(&experience.scale)
        );
    }
    println!(
        "{}  {:<14} {}",
        "┃".bright_magenta(),
        "Updated:".bright_yellow(),
        experience.updated_at.format("%Y-%m-%d %H:%M UTC")
    );
}

fn value_or_dash(value: &str) -> &str {
    if value.is_empty() { "—" } else { value }
}

fn format_vec(v: &crate::models::Vec3) -> String {
    format!("({}, {}, {})", v.x, v.y, v.z)
}

/// Exports the catalog to JSON. A directory path gets the default filename.
pub fn export_catalog(path: Option<&str>) -> Result<(), Box<dyn Error>> {
    let storage = StorageManager::new()?;
    let (catalog, _) = storage.load_catalog();

    let target = path.unwrap_or(export::EXPORT_FILE_NAME);
    let written = export::export_to_file(&catalog, Path::new(target))?;

    println!(
        "{}  Exported {} experiences to {}",
        "┃".bright_magenta(),
        catalog.total_experiences().to_string().yellow(),
        written.display().to_string().bright_white()
    );

    Ok(())
}

/// Replaces the stored catalog with an imported JSON file. The previous
/// snapshot is backed up first.
pub fn import_catalog(file: &str) -> Result<(), Box<dyn Error>> {
    let storage = StorageManager::new()?;
    let catalog = export::import_from_file(Path::new(file))?;

    if let Some(backup) = storage.backup_catalog()? {
        println!(
            "{}  Previous catalog backed up to {}",
            "┃".bright_magenta(),
            backup.display().to_string().dimmed()
        );
    }

    storage.save_catalog(&catalog)?;

    println!(
        "{}  Imported {} experiences from {}",
        "┃".bright_magenta(),
        catalog.total_experiences().to_string().yellow(),
        file.bright_white()
    );

    Ok(())
}

/// Generates the standalone WebXR app at `output`.
pub fn generate_app(output: &str, flags: &[String]) -> Result<(), Box<dyn Error>> {
    let (options, data_dir) = parse_generate_flags(flags)?;

    let storage = match data_dir {
        Some(dir) => StorageManager::with_data_dir(dir)?,
        None => StorageManager::new()?,
    };
    let (catalog, _) = storage.load_catalog();
    let document = generator::generate(&catalog, &options)?;
    std::fs::write(output, document)?;

    println!(
        "{}  Generated {} ({} experiences, language {}, {} style)",
        "┃".bright_magenta(),
        output.bright_white().bold(),
        catalog.total_experiences().to_string().yellow(),
        options.language,
        options.menu_style
    );

    Ok(())
}

fn parse_generate_flags(
    flags: &[String],
) -> Result<(GeneratorOptions, Option<std::path::PathBuf>), Box<dyn Error>> {
    let mut options = GeneratorOptions::default();
    let mut data_dir = None;

    let mut iter = flags.iter();
    while let Some(flag) = iter.next() {
        let mut value_for = |name: &str| -> Result<String, Box<dyn Error>> {
            iter.next()
                .cloned()
                .ok_or_else(|| format!("{name} requires a value").into())
        };

        match flag.as_str() {
            "--title" => options.title = value_for("--title")?,
            "--description" => options.description = value_for("--description")?,
            "--color" => options.primary_color = value_for("--color")?,
            "--lang" => options.language = value_for("--lang")?.to_lowercase(),
            "--style" => options.menu_style = value_for("--style")?.parse()?,
            "--no-loading" => options.include_loading_screen = false,
            "--data-dir" => data_dir = Some(value_for("--data-dir")?.into()),
            other => {
                return Err(format!("Unknown generate option: {other}").into());
            }
        }
    }

    Ok((options, data_dir))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::options::MenuStyle;

    #[test]
    fn test_generate_flags_override_defaults() {
        let flags: Vec<String> = [
            "--title",
            "My Gallery",
            "--color",
            "#ff0000",
            "--lang",
            "EN",
            "--style",
            "carousel",
            "--no-loading",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect();

        let (options, data_dir) = parse_generate_flags(&flags).unwrap();
        assert!(data_dir.is_none());
        assert_eq!(options.title, "My Gallery");
        assert_eq!(options.primary_color, "#ff0000");
        assert_eq!(options.language, "en");
        assert_eq!(options.menu_style, MenuStyle::Carousel);
        assert!(!options.include_loading_screen);
    }

    #[test]
    fn test_generate_flags_reject_dangling_value() {
        let flags = vec![String::from("--title")];
        assert!(parse_generate_flags(&flags).is_err());

        let flags = vec![String::from("--frobnicate")];
        assert!(parse_generate_flags(&flags).is_err());
    }
}
