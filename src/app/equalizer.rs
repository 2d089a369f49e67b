use rand::Rng;

/// Colour of a single equalizer bar; the UI maps it to a terminal colour.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Hue {
    Green,
    Red,
    Blue,
    Yellow,
}

const HUES: [Hue; 4] = [Hue::Green, Hue::Red, Hue::Blue, Hue::Yellow];

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Level {
    pub height: u64,
    pub hue: Hue,
}

/// Decorative bar animation shown while music is playing.
///
/// Purely visual: heights are random, not derived from the audio.
#[derive(Debug, Clone)]
pub struct Equalizer {
    width: usize,
    levels: Vec<Level>,
}

impl Equalizer {
    pub const MAX_HEIGHT: u64 = 100;

    pub fn new(width: usize) -> Self {
        Self {
            width,
            levels: Vec::new(),
        }
    }

    /// Redraw random bars while `playing`, otherwise blank the display.
    pub fn tick<R: Rng + ?Sized>(&mut self, playing: bool, rng: &mut R) {
        if !playing {
            self.clear();
            return;
        }
        self.levels = (0..self.width)
            .map(|_| Level {
                height: rng.gen_range(1..=Self::MAX_HEIGHT),
                hue: HUES[rng.gen_range(0..HUES.len())],
            })
            .collect();
    }

    pub fn clear(&mut self) {
        self.levels.clear();
    }

    pub fn levels(&self) -> &[Level] {
        &self.levels
    }

    pub fn is_clear(&self) -> bool {
        self.levels.is_empty()
    }

    pub fn width(&self) -> usize {
        self.width
    }
}
