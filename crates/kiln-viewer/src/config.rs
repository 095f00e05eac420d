use kiln_engine::paint::Color;
use kiln_engine::window::RuntimeConfig;
use winit::dpi::LogicalSize;

/// Startup and per-frame constants for the viewer window.
#[derive(Debug, Clone)]
pub struct ViewerConfig {
    pub title: String,
    pub width: f64,
    pub height: f64,
    /// Pixel size the body font is registered at.
    pub font_size: u16,
    pub clear_color: Color,
    /// Factor handed to the layout engine with every wheel event.
    pub scroll_factor: f32,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            title: "Kiln".to_string(),
            width: 640.0,
            height: 480.0,
            font_size: 16,
            clear_color: Color::from_srgb_u8(0, 0, 0, 255),
            scroll_factor: 0.01,
        }
    }
}

impl ViewerConfig {
    pub fn runtime(&self) -> RuntimeConfig {
        RuntimeConfig {
            title: self.title.clone(),
            initial_size: LogicalSize::new(self.width, self.height),
            resizable: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_window_contract() {
        let config = ViewerConfig::default();
        assert_eq!(config.title, "Kiln");
        assert_eq!((config.width, config.height), (640.0, 480.0));
        assert_eq!(config.font_size, 16);
        assert_eq!(config.clear_color, Color::black());
        assert_eq!(config.scroll_factor, 0.01);
    }

    #[test]
    fn runtime_config_is_resizable_with_same_size() {
        let runtime = ViewerConfig::default().runtime();
        assert_eq!(runtime.title, "Kiln");
        assert_eq!(runtime.initial_size, LogicalSize::new(640.0, 480.0));
        assert!(runtime.resizable);
    }
}
