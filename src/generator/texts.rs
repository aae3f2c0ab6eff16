/// Every user-facing label of the generated app. Exactly two built-in
/// bundles exist; `"es"` selects Spanish and anything else falls back to
/// English, matching the behavior the wire format was designed around.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextBundle {
    pub loading: &'static str,
    pub start: &'static str,
    pub back: &'static str,
    pub ar: &'static str,
    pub mr: &'static str,
    pub vr: &'static str,
    pub enter_ar: &'static str,
    pub enter_vr: &'static str,
    pub external: &'static str,
    pub ar_support: &'static str,
    pub vr_support: &'static str,
    pub loading_3d: &'static str,
    pub no_experiences: &'static str,
}

pub const SPANISH: TextBundle = TextBundle {
    loading: "Cargando...",
    start: "Iniciar",
    back: "Volver",
    ar: "Realidad Aumentada",
    mr: "Realidad Mixta",
    vr: "Realidad Virtual",
    enter_ar: "Entrar en AR",
    enter_vr: "Entrar en VR",
    external: "Abrir experiencia externa",
    ar_support: "Tu dispositivo no soporta AR",
    vr_support: "Tu dispositivo no soporta VR",
    loading_3d: "Cargando modelo 3D...",
    no_experiences: "No hay experiencias disponibles en esta categoría",
};

pub const ENGLISH: TextBundle = TextBundle {
    loading: "Loading...",
    start: "Start",
    back: "Back",
    ar: "Augmented Reality",
    mr: "Mixed Reality",
    vr: "Virtual Reality",
    enter_ar: "Enter AR",
    enter_vr: "Enter VR",
    external: "Open external experience",
    ar_support: "Your device does not support AR",
    vr_support: "Your device does not support VR",
    loading_3d: "Loading 3D model...",
    no_experiences: "No experiences available in this category",
};

pub fn bundle_for(language: &str) -> &'static TextBundle {
    if language == "es" { &SPANISH } else { &ENGLISH }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_es_selects_the_spanish_bundle() {
        assert_eq!(bundle_for("es"), &SPANISH);
        assert_eq!(bundle_for("en"), &ENGLISH);
        assert_eq!(bundle_for("fr"), &ENGLISH);
        assert_eq!(bundle_for(""), &ENGLISH);
    }
}
