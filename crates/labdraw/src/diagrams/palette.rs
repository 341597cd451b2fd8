//! The Google Cloud color scheme shared by the lab diagrams.

use labdraw_core::color::Color;

/// Named colors of the lab diagrams.
#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    pub gcp_blue: Color,
    pub gcp_red: Color,
    pub gcp_yellow: Color,
    pub gcp_green: Color,
    pub internet: Color,
    pub vpc: Color,
    pub subnet_web: Color,
    pub subnet_app: Color,
    pub subnet_db: Color,
    pub security: Color,
    pub compute: Color,
    pub text_primary: Color,
    pub text_secondary: Color,
    pub border: Color,
    pub white: Color,
}

impl Palette {
    pub fn gcp() -> Self {
        Self {
            gcp_blue: hex("#4285F4"),
            gcp_red: hex("#EA4335"),
            gcp_yellow: hex("#FBBC04"),
            gcp_green: hex("#34A853"),
            internet: hex("#E8F0FE"),
            vpc: hex("#F8F9FA"),
            subnet_web: hex("#E3F2FD"),
            subnet_app: hex("#F3E5F5"),
            subnet_db: hex("#E8F5E8"),
            security: hex("#FFF3E0"),
            compute: hex("#FFFFFF"),
            text_primary: hex("#202124"),
            text_secondary: hex("#5F6368"),
            border: hex("#DADCE0"),
            white: Color::white(),
        }
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::gcp()
    }
}

fn hex(code: &str) -> Color {
    Color::new(code).expect("palette colors are valid hex codes")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_palette_colors() {
        let palette = Palette::gcp();
        assert_eq!(palette.gcp_blue.to_svg_paint(), "#4285f4");
        assert_eq!(palette.text_secondary.to_svg_paint(), "#5f6368");
        assert_eq!(palette.compute.to_rgba8(), palette.white.to_rgba8());
        assert_ne!(palette.subnet_web, palette.subnet_app);
    }
}
