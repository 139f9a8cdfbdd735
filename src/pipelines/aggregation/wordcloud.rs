use std::collections::HashMap;

use rand::{rngs::StdRng, Rng, SeedableRng};
use serde::Serialize;

use super::{tokenize, AggregationError};

/// Colors sampled along the viridis colormap
static VIRIDIS: &[&str] = &[
    "#440154", "#482878", "#3e4989", "#31688e", "#26828e", "#1f9e89", "#35b779", "#6ece58",
    "#b5de2b", "#fde725",
];

static SVG_TEMPLATE: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" width="{{ width }}" height="{{ height }}" viewBox="0 0 {{ width }} {{ height }}">
{%- for word in words %}
  <text x="{{ word.anchor_x }}" y="{{ word.anchor_y }}" font-family="sans-serif" font-size="{{ word.font_size }}" fill="{{ word.color }}" dominant-baseline="hanging"{% if word.rotated %} transform="rotate(-90 {{ word.anchor_x }} {{ word.anchor_y }})"{% endif %}>{{ word.text | escape }}</text>
{%- endfor %}
</svg>
"#;

/// Approximate glyph width relative to the font size
const GLYPH_WIDTH: f32 = 0.6;

/// Font size multiplier applied each time a word does not fit
const SHRINK: f32 = 0.9;

/// Candidate positions tried per font size
const SPIRAL_STEPS: usize = 2_000;

/// Word cloud layout settings
#[derive(burn::config::Config)]
pub struct WordCloudConfig {
    /// Canvas width in pixels
    #[config(default = 800)]
    pub width: usize,

    /// Canvas height in pixels
    #[config(default = 400)]
    pub height: usize,

    /// The most words placed
    #[config(default = 150)]
    pub max_words: usize,

    /// Smallest font size; words that only fit below it are left out
    #[config(default = 4.0)]
    pub min_font_size: f32,

    /// Font size of the most frequent word
    #[config(default = 96.0)]
    pub max_font_size: f32,

    /// Share of words laid out horizontally
    #[config(default = 0.9)]
    pub prefer_horizontal: f64,

    /// Seed for positions, orientation and colors
    #[config(default = 42)]
    pub seed: u64,
}

/// A word placed on the canvas. (x, y) is the top-left corner of its bounding box.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PlacedWord {
    /// The word
    pub text: String,

    /// Occurrences in the slice
    pub frequency: usize,

    /// Font size in pixels
    pub font_size: f32,

    /// Bounding box left edge
    pub x: f32,

    /// Bounding box top edge
    pub y: f32,

    /// Bounding box width
    pub width: f32,

    /// Bounding box height
    pub height: f32,

    /// Whether the word runs bottom to top
    pub rotated: bool,

    /// Fill color
    pub color: String,

    /// Text anchor x, before rotation
    pub anchor_x: f32,

    /// Text anchor y, before rotation
    pub anchor_y: f32,
}

impl PlacedWord {
    fn overlaps(&self, x: f32, y: f32, width: f32, height: f32) -> bool {
        x < self.x + self.width
            && self.x < x + width
            && y < self.y + self.height
            && self.y < y + height
    }
}

/// A laid-out word cloud
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct WordCloud {
    /// Canvas width
    pub width: usize,

    /// Canvas height
    pub height: usize,

    /// Placed words, most frequent first
    pub words: Vec<PlacedWord>,
}

/// Count words across all texts, most frequent first. Equal counts keep first-seen order.
pub fn word_frequencies<S: AsRef<str>>(texts: &[S]) -> Vec<(String, usize)> {
    let mut positions: HashMap<String, usize> = HashMap::new();
    let mut counts: Vec<(String, usize)> = Vec::new();

    for word in texts.iter().flat_map(|text| tokenize(text.as_ref())) {
        match positions.get(&word) {
            Some(&position) => counts[position].1 += 1,
            None => {
                positions.insert(word.clone(), counts.len());
                counts.push((word, 1));
            }
        }
    }

    counts.sort_by(|a, b| b.1.cmp(&a.1));

    counts
}

impl WordCloud {
    /// Lay out the words of a sentiment slice. Returns `None` if the slice has no words.
    ///
    /// The layout only depends on the input and the configured seed.
    pub fn generate<S: AsRef<str>>(texts: &[S], config: &WordCloudConfig) -> Option<Self> {
        let mut frequencies = word_frequencies(texts);
        frequencies.truncate(config.max_words);

        let max_frequency = frequencies.first()?.1 as f32;

        let mut rng = StdRng::seed_from_u64(config.seed);
        let canvas_width = config.width as f32;
        let canvas_height = config.height as f32;

        let mut words: Vec<PlacedWord> = Vec::with_capacity(frequencies.len());

        for (text, frequency) in frequencies {
            // Relative scaling of one half between rank and frequency
            let relative = frequency as f32 / max_frequency;
            let mut font_size = config.max_font_size * (0.5 + 0.5 * relative);

            let rotated = !rng.gen_bool(config.prefer_horizontal.clamp(0.0, 1.0));
            let color = VIRIDIS[rng.gen_range(0..VIRIDIS.len())].to_string();

            while font_size >= config.min_font_size {
                let length = text.chars().count() as f32 * font_size * GLYPH_WIDTH;
                let (width, height) = if rotated {
                    (font_size, length)
                } else {
                    (length, font_size)
                };

                if width <= canvas_width && height <= canvas_height {
                    let start_x = rng.gen_range(0.0..=canvas_width - width);
                    let start_y = rng.gen_range(0.0..=canvas_height - height);

                    let spot = spiral(start_x, start_y).take(SPIRAL_STEPS).find(|&(x, y)| {
                        x >= 0.0
                            && y >= 0.0
                            && x + width <= canvas_width
                            && y + height <= canvas_height
                            && !words.iter().any(|w| w.overlaps(x, y, width, height))
                    });

                    if let Some((x, y)) = spot {
                        let (anchor_x, anchor_y) = if rotated { (x, y + height) } else { (x, y) };

                        words.push(PlacedWord {
                            text,
                            frequency,
                            font_size: round(font_size),
                            x: round(x),
                            y: round(y),
                            width: round(width),
                            height: round(height),
                            rotated,
                            color,
                            anchor_x: round(anchor_x),
                            anchor_y: round(anchor_y),
                        });

                        break;
                    }
                }

                font_size *= SHRINK;
            }
        }

        Some(Self {
            width: config.width,
            height: config.height,
            words,
        })
    }

    /// Render the layout as an SVG document
    pub fn to_svg(&self) -> Result<String, AggregationError> {
        let template = liquid::ParserBuilder::with_stdlib()
            .build()?
            .parse(SVG_TEMPLATE)?;

        let globals = liquid::to_object(self)?;

        Ok(template.render(&globals)?)
    }
}

/// Points along an Archimedean spiral around a starting point
fn spiral(x: f32, y: f32) -> impl Iterator<Item = (f32, f32)> {
    (0..).map(move |step| {
        let t = step as f32 * 0.1;
        (x + t * 2.0 * t.cos(), y + t * t.sin())
    })
}

/// Round to one decimal place
fn round(value: f32) -> f32 {
    (value * 10.0).round() / 10.0
}
