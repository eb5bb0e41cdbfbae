//! Track styling shared by every renderer and by the CLI configuration.

use serde::{Deserialize, Serialize};

use crate::layout::{FrequencyBarLayout, LabelStackLayout};

/// Nucleotide colours.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BaseColors {
    #[serde(default = "default_base_a")]
    pub a: String,
    #[serde(default = "default_base_c")]
    pub c: String,
    #[serde(default = "default_base_g")]
    pub g: String,
    #[serde(default = "default_base_t")]
    pub t: String,
    #[serde(default = "default_base_n")]
    pub n: String,
}

impl BaseColors {
    /// Colour for a single-base allele or reference base; `n` for anything else.
    pub fn color_for(&self, base: &str) -> &str {
        match base {
            "A" | "a" => &self.a,
            "C" | "c" => &self.c,
            "G" | "g" => &self.g,
            "T" | "t" | "U" | "u" => &self.t,
            _ => &self.n,
        }
    }
}

impl Default for BaseColors {
    fn default() -> Self {
        Self {
            a: default_base_a(),
            c: default_base_c(),
            g: default_base_g(),
            t: default_base_t(),
            n: default_base_n(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackStyle {
    /// Fill used to clear nothing-drawn space on vector backends
    #[serde(default = "default_background")]
    pub background: String,

    /// Variant marker fill
    #[serde(default = "default_variant_fill")]
    pub variant_fill: String,

    /// Top edge of variant markers
    #[serde(default = "default_variant_top")]
    pub variant_top: f64,

    /// Height of variant markers
    #[serde(default = "default_variant_height")]
    pub variant_height: f64,

    #[serde(default = "default_label_font_size")]
    pub label_font_size: f64,

    /// Baseline of level-0 labels below the marker's bottom edge
    #[serde(default = "default_label_offset")]
    pub label_offset: f64,

    #[serde(default = "default_label_line_height")]
    pub label_line_height: f64,

    /// Horizontal clearance required between neighbouring labels
    #[serde(default = "default_label_gap")]
    pub label_gap: f64,

    /// Deepest label level before wrapping back to 0
    #[serde(default = "default_max_label_level")]
    pub max_label_level: usize,

    #[serde(default = "default_label_background")]
    pub label_background: String,

    #[serde(default = "default_label_color")]
    pub label_color: String,

    /// Height of allele-frequency columns
    #[serde(default = "default_column_height")]
    pub column_height: f64,

    /// Smallest drawn sub-bar, so rare alleles stay clickable
    #[serde(default = "default_min_bar_height")]
    pub min_bar_height: f64,

    #[serde(default = "default_column_stroke")]
    pub column_stroke: String,

    #[serde(default = "default_indel_color")]
    pub indel_color: String,

    #[serde(default = "default_reference_font_size")]
    pub reference_font_size: f64,

    #[serde(default)]
    pub base_colors: BaseColors,
}

// Default value functions
fn default_background() -> String { "#ffffff".to_string() }
fn default_variant_fill() -> String { "#dddddd".to_string() }
fn default_variant_top() -> f64 { 4.0 }
fn default_variant_height() -> f64 { 14.0 }
fn default_label_font_size() -> f64 { 10.0 }
fn default_label_offset() -> f64 { 12.0 }
fn default_label_line_height() -> f64 { 10.0 }
fn default_label_gap() -> f64 { 2.0 }
fn default_max_label_level() -> usize { 10 }
fn default_label_background() -> String { "white".to_string() }
fn default_label_color() -> String { "black".to_string() }
fn default_column_height() -> f64 { 190.0 }
fn default_min_bar_height() -> f64 { 2.0 }
fn default_column_stroke() -> String { "#ffffff".to_string() }
fn default_indel_color() -> String { "#666666".to_string() }
fn default_reference_font_size() -> f64 { 12.0 }
fn default_base_a() -> String { "#188712".to_string() }
fn default_base_c() -> String { "#0600f9".to_string() }
fn default_base_g() -> String { "#c45c16".to_string() }
fn default_base_t() -> String { "#f70016".to_string() }
fn default_base_n() -> String { "#000000".to_string() }

impl Default for TrackStyle {
    fn default() -> Self {
        Self {
            background: default_background(),
            variant_fill: default_variant_fill(),
            variant_top: default_variant_top(),
            variant_height: default_variant_height(),
            label_font_size: default_label_font_size(),
            label_offset: default_label_offset(),
            label_line_height: default_label_line_height(),
            label_gap: default_label_gap(),
            max_label_level: default_max_label_level(),
            label_background: default_label_background(),
            label_color: default_label_color(),
            column_height: default_column_height(),
            min_bar_height: default_min_bar_height(),
            column_stroke: default_column_stroke(),
            indel_color: default_indel_color(),
            reference_font_size: default_reference_font_size(),
            base_colors: BaseColors::default(),
        }
    }
}

impl TrackStyle {
    pub fn label_layout(&self) -> LabelStackLayout {
        LabelStackLayout::new(self.max_label_level, self.label_gap, self.label_line_height)
    }

    pub fn frequency_layout(&self, available_height: f64) -> FrequencyBarLayout {
        FrequencyBarLayout::new(
            self.column_height.min(available_height - 1.0).max(0.0),
            self.min_bar_height,
        )
    }
}
