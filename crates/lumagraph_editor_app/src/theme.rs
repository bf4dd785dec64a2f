// SPDX-License-Identifier: MIT OR Apache-2.0
//! Editor look and feel.

use egui::{Color32, Rounding, Stroke, Style, Visuals};

/// Dark theme with rounded node windows
#[derive(Debug, Clone, PartialEq)]
pub struct EditorTheme {
    /// Corner radius of windows
    pub window_rounding: f32,
    /// Corner radius of widgets
    pub widget_rounding: f32,
    /// Spacing between items
    pub item_spacing: f32,
    /// Canvas and panel background
    pub background: Color32,
    /// Node window background
    pub window_fill: Color32,
}

impl Default for EditorTheme {
    fn default() -> Self {
        Self {
            window_rounding: 7.0,
            widget_rounding: 3.0,
            item_spacing: 6.0,
            background: Color32::from_rgb(28, 28, 30),
            window_fill: Color32::from_rgb(45, 45, 48),
        }
    }
}

impl EditorTheme {
    /// Convert to egui Visuals
    pub fn to_egui_visuals(&self) -> Visuals {
        let mut visuals = Visuals::dark();

        visuals.window_fill = self.window_fill;
        visuals.window_stroke = Stroke::new(1.0, Color32::from_gray(70));
        visuals.window_rounding = Rounding::same(self.window_rounding);
        visuals.panel_fill = self.background;
        visuals.extreme_bg_color = self.background;

        for widgets in [
            &mut visuals.widgets.noninteractive,
            &mut visuals.widgets.inactive,
            &mut visuals.widgets.hovered,
            &mut visuals.widgets.active,
        ] {
            widgets.rounding = Rounding::same(self.widget_rounding);
        }

        visuals
    }

    /// Convert to egui Style
    pub fn to_egui_style(&self) -> Style {
        let mut style = Style {
            visuals: self.to_egui_visuals(),
            ..Default::default()
        };
        style.spacing.item_spacing = egui::vec2(self.item_spacing, self.item_spacing);
        style
    }

    /// Apply the theme to an egui context
    pub fn apply(&self, ctx: &egui::Context) {
        ctx.set_style(self.to_egui_style());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_is_dark_and_rounded() {
        let style = EditorTheme::default().to_egui_style();
        assert!(style.visuals.dark_mode);
        assert_eq!(style.visuals.window_rounding, Rounding::same(7.0));
        assert_eq!(style.spacing.item_spacing, egui::vec2(6.0, 6.0));
    }

    #[test]
    fn test_apply_sets_context_style() {
        let ctx = egui::Context::default();
        let theme = EditorTheme::default();
        theme.apply(&ctx);
        assert_eq!(ctx.style().visuals.window_fill, theme.window_fill);
    }
}
