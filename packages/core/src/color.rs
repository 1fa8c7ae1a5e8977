//! Per-class color assignment.

use rand::Rng;
use std::str::FromStr;

/// Curated swatches that stay legible against both the light card background
/// and the dark badge text.
const CURATED: [&str; 27] = [
    "#E6194B", "#3CB44B", "#FFE119", "#4363D8", "#F58231", "#911EB4", "#46F0F0", "#F032E6",
    "#BCF60C", "#FABEBE", "#008080", "#E6BEFF", "#9A6324", "#FFFAC8", "#DC7633", "#AAFFC3",
    "#808000", "#FFD8B1", "#5DADE2", "#A9A9A9", "#FF6F61", "#6B5B95", "#88B04B", "#F7CAC9",
    "#92A8D1", "#955251", "#B565A7",
];

/// Any channel at or below this value forces the other two into the bright half
const DARK_CHANNEL: u8 = 128;
/// Floor for the other channels when the first one is already bright
const CHANNEL_FLOOR: u8 = 64;
/// Minimum R+G+B for a generated color
const MIN_BRIGHTNESS: u16 = 350;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub fn sum(&self) -> u16 {
        self.r as u16 + self.g as u16 + self.b as u16
    }

    pub fn hex(&self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

/// Fixed ordered palette cycled by class index
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    colors: Vec<String>,
}

impl Palette {
    pub fn curated() -> Self {
        Self {
            colors: CURATED.iter().map(|c| c.to_string()).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    pub fn color(&self, index: usize) -> &str {
        &self.colors[index % self.colors.len()]
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::curated()
    }
}

/// How class colors are chosen, fixed for the lifetime of the process
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColorStrategy {
    /// `palette[i mod len]`, reproducible across runs. Classes past the
    /// palette size share colors with earlier ones.
    Palette(Palette),
    /// Fresh bright color per class on every call
    Random,
}

impl Default for ColorStrategy {
    fn default() -> Self {
        ColorStrategy::Palette(Palette::curated())
    }
}

impl FromStr for ColorStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "palette" => Ok(ColorStrategy::default()),
            "random" => Ok(ColorStrategy::Random),
            other => Err(format!("Unknown color strategy: {}", other)),
        }
    }
}

impl ColorStrategy {
    /// One `#RRGGBB` string per class index
    pub fn colors_for(&self, n: usize) -> Vec<String> {
        match self {
            ColorStrategy::Palette(palette) => {
                (0..n).map(|i| palette.color(i).to_string()).collect()
            }
            ColorStrategy::Random => random_colors(&mut rand::rng(), n),
        }
    }
}

pub fn random_colors<R: Rng>(rng: &mut R, n: usize) -> Vec<String> {
    (0..n).map(|_| bright_color(rng).hex()).collect()
}

/// Resamples until the channel sum clears the brightness floor
pub fn bright_color<R: Rng>(rng: &mut R) -> Rgb {
    loop {
        let color = random_color(rng);
        if color.sum() >= MIN_BRIGHTNESS {
            return color;
        }
    }
}

fn random_color<R: Rng>(rng: &mut R) -> Rgb {
    let r: u8 = rng.random();
    let floor = if r > DARK_CHANNEL {
        CHANNEL_FLOOR
    } else {
        DARK_CHANNEL
    };
    Rgb {
        r,
        g: rng.random_range(floor..=u8::MAX),
        b: rng.random_range(floor..=u8::MAX),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn is_hex_color(s: &str) -> bool {
        s.len() == 7
            && s.starts_with('#')
            && s[1..].chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_lowercase())
    }

    #[test]
    fn test_palette_colors_are_hex_and_stable() {
        let strategy = ColorStrategy::default();
        for n in [0, 1, 2, 26, 27, 28, 100] {
            let first = strategy.colors_for(n);
            assert_eq!(first.len(), n);
            assert!(first.iter().all(|c| is_hex_color(c)));
            assert_eq!(first, strategy.colors_for(n));
        }
    }

    #[test]
    fn test_palette_cycles_modulo_size() {
        let palette = Palette::curated();
        let colors = ColorStrategy::Palette(palette.clone()).colors_for(palette.len() + 2);
        assert_eq!(colors[palette.len()], colors[0]);
        assert_eq!(colors[palette.len() + 1], colors[1]);
    }

    #[test]
    fn test_curated_palette_is_distinct() {
        let mut colors: Vec<_> = CURATED.to_vec();
        colors.sort();
        colors.dedup();
        assert_eq!(colors.len(), CURATED.len());
    }

    #[test]
    fn test_random_colors_are_bright() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..500 {
            let color = bright_color(&mut rng);
            assert!(color.sum() >= MIN_BRIGHTNESS);
            if color.r <= DARK_CHANNEL {
                assert!(color.g >= DARK_CHANNEL && color.b >= DARK_CHANNEL);
            } else {
                assert!(color.g >= CHANNEL_FLOOR && color.b >= CHANNEL_FLOOR);
            }
        }
    }

    #[test]
    fn test_random_strategy_shape() {
        let colors = ColorStrategy::Random.colors_for(12);
        assert_eq!(colors.len(), 12);
        assert!(colors.iter().all(|c| is_hex_color(c)));
    }

    #[test]
    fn test_strategy_parse() {
        assert_eq!(
            "palette".parse::<ColorStrategy>().unwrap(),
            ColorStrategy::default()
        );
        assert_eq!(
            "Random".parse::<ColorStrategy>().unwrap(),
            ColorStrategy::Random
        );
        assert!("rainbow".parse::<ColorStrategy>().is_err());
    }

    #[test]
    fn test_rgb_hex() {
        assert_eq!(Rgb { r: 255, g: 8, b: 0 }.hex(), "#FF0800");
    }
}
