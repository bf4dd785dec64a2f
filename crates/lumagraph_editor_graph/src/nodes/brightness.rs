// SPDX-License-Identifier: MIT OR Apache-2.0
//! Brightness/contrast node.

use crate::pin::Pin;
use crate::resource::ImageRef;
use std::ops::RangeInclusive;

/// Accepted brightness values
pub const BRIGHTNESS_RANGE: RangeInclusive<f32> = -100.0..=100.0;

/// Accepted contrast values
pub const CONTRAST_RANGE: RangeInclusive<f32> = 0.0..=3.0;

const DEFAULT_BRIGHTNESS: f32 = 0.0;
const DEFAULT_CONTRAST: f32 = 1.0;
const SLIDER_WIDTH: f32 = 80.0;

/// Adjusts brightness and contrast of the image bridged to its input
#[derive(Debug)]
pub struct BrightnessNode {
    /// Brightness offset
    pub brightness: f32,
    /// Contrast factor
    pub contrast: f32,
    source: Option<ImageRef>,
}

impl BrightnessNode {
    /// Create a node with neutral settings
    pub fn new() -> Self {
        Self {
            brightness: DEFAULT_BRIGHTNESS,
            contrast: DEFAULT_CONTRAST,
            source: None,
        }
    }

    /// Restore the default brightness
    pub fn reset_brightness(&mut self) {
        self.brightness = DEFAULT_BRIGHTNESS;
    }

    /// Restore the default contrast
    pub fn reset_contrast(&mut self) {
        self.contrast = DEFAULT_CONTRAST;
    }

    /// Image adopted from upstream
    pub fn source(&self) -> Option<&ImageRef> {
        self.source.as_ref()
    }

    /// Adopt the image of the first bridged pin among `pins`
    pub fn adopt_bridged<'a>(&mut self, pins: impl IntoIterator<Item = &'a Pin>) {
        let Some(pin) = pins.into_iter().find(|p| p.bridged) else {
            return;
        };
        if self.source != pin.image {
            tracing::debug!("{} now carries an upstream image", pin.owner);
            self.source = pin.image.clone();
        }
    }

    /// Render the controls
    pub fn ui(&mut self, ui: &mut egui::Ui) {
        ui.spacing_mut().slider_width = SLIDER_WIDTH;

        ui.horizontal(|ui| {
            ui.label("Brightness");
            if ui.small_button("Reset").clicked() {
                self.reset_brightness();
            }
        });
        ui.add(egui::Slider::new(&mut self.brightness, BRIGHTNESS_RANGE));

        ui.horizontal(|ui| {
            ui.label("Contrast");
            if ui.small_button("Reset").clicked() {
                self.reset_contrast();
            }
        });
        ui.add(egui::Slider::new(&mut self.contrast, CONTRAST_RANGE));

        match self.source.as_ref().and_then(ImageRef::get) {
            Some(image) => {
                let [w, h] = image.size();
                ui.weak(format!("Source {w} x {h}"));
            }
            None => {
                ui.weak("No input");
            }
        }
    }
}

impl Default for BrightnessNode {
    fn default() -> Self {
        Self::new()
    }
}
