use serde::{Deserialize, Serialize};

/// Discrete light band. The only key used for strategy lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Wavelength {
    Microwave,
    Infrared,
    Visible,
    Ultraviolet,
}

impl Wavelength {
    pub const COUNT: usize = 4;

    pub const ALL: [Wavelength; Self::COUNT] = [
        Wavelength::Microwave,
        Wavelength::Infrared,
        Wavelength::Visible,
        Wavelength::Ultraviolet,
    ];

    /// Stable index, also used as the wire code in frame buffers.
    pub const fn index(self) -> usize {
        match self {
            Wavelength::Microwave => 0,
            Wavelength::Infrared => 1,
            Wavelength::Visible => 2,
            Wavelength::Ultraviolet => 3,
        }
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Representative wavelength in metres, for display.
    pub const fn meters(self) -> f64 {
        match self {
            Wavelength::Microwave => 0.024,
            Wavelength::Infrared => 850e-9,
            Wavelength::Visible => 580e-9,
            Wavelength::Ultraviolet => 271e-9,
        }
    }
}

/// Fixed lookup table with one optional slot per wavelength.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WavelengthTable<T: Copy> {
    slots: [Option<T>; Wavelength::COUNT],
}

impl<T: Copy> WavelengthTable<T> {
    pub const fn empty() -> Self {
        Self { slots: [None; Wavelength::COUNT] }
    }

    /// Builder: fill one slot.
    pub fn with(mut self, wavelength: Wavelength, value: T) -> Self {
        self.slots[wavelength.index()] = Some(value);
        self
    }

    pub fn get(&self, wavelength: Wavelength) -> Option<T> {
        self.slots[wavelength.index()]
    }

    pub fn contains(&self, wavelength: Wavelength) -> bool {
        self.slots[wavelength.index()].is_some()
    }

    /// Iterate the filled slots.
    pub fn iter(&self) -> impl Iterator<Item = (Wavelength, T)> + '_ {
        Wavelength::ALL
            .iter()
            .filter_map(move |&w| self.get(w).map(|v| (w, v)))
    }

    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }
}

impl<T: Copy> Default for WavelengthTable<T> {
    fn default() -> Self {
        Self::empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_round_trips() {
        for w in Wavelength::ALL {
            assert_eq!(Wavelength::from_index(w.index()), Some(w));
        }
        assert_eq!(Wavelength::from_index(4), None);
    }

    #[test]
    fn table_lookup() {
        let table = WavelengthTable::empty()
            .with(Wavelength::Infrared, 'v')
            .with(Wavelength::Microwave, 'r');
        assert_eq!(table.get(Wavelength::Infrared), Some('v'));
        assert_eq!(table.get(Wavelength::Visible), None);
        assert!(table.contains(Wavelength::Microwave));
        assert_eq!(table.iter().count(), 2);
        assert!(WavelengthTable::<char>::empty().is_empty());
    }

    #[test]
    fn serializes_snake_case() {
        let json = serde_json::to_string(&Wavelength::Ultraviolet).unwrap();
        assert_eq!(json, "\"ultraviolet\"");
    }
}
