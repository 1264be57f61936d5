use vb_config::{GestureConfig, PowerTierConfig};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PowerTier {
    pub min_active: usize,
    pub power: f32,
}

impl From<&PowerTierConfig> for PowerTier {
    fn from(c: &PowerTierConfig) -> Self {
        Self {
            min_active: c.min_active,
            power: c.power,
        }
    }
}

/// Maps the number of active predicates to a jump power.
#[derive(Debug, Clone, PartialEq)]
pub struct PowerTable {
    tiers: Vec<PowerTier>,
    base: f32,
}

impl PowerTable {
    /// Tiers are sorted by descending `min_active` so the strongest match wins.
    pub fn new(mut tiers: Vec<PowerTier>, base: f32) -> Self {
        tiers.sort_by(|a, b| b.min_active.cmp(&a.min_active));
        Self { tiers, base }
    }

    pub fn power_for(&self, active: usize) -> f32 {
        self.tiers
            .iter()
            .find(|t| active >= t.min_active)
            .map(|t| t.power)
            .unwrap_or(self.base)
    }

    pub fn base(&self) -> f32 {
        self.base
    }
}

impl From<&GestureConfig> for PowerTable {
    fn from(cfg: &GestureConfig) -> Self {
        Self::new(
            cfg.power_tiers.iter().map(PowerTier::from).collect(),
            cfg.base_power,
        )
    }
}

impl Default for PowerTable {
    fn default() -> Self {
        Self::from(&GestureConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_breakpoints() {
        let t = PowerTable::default();
        assert_eq!(t.power_for(0), 12.0);
        assert_eq!(t.power_for(1), 14.0);
        assert_eq!(t.power_for(2), 14.0);
        assert_eq!(t.power_for(3), 16.0);
        assert_eq!(t.power_for(4), 16.0);
        assert_eq!(t.power_for(5), 20.0);
    }

    #[test]
    fn unsorted_tiers_are_ordered() {
        let t = PowerTable::new(
            vec![
                PowerTier {
                    min_active: 1,
                    power: 16.0,
                },
                PowerTier {
                    min_active: 3,
                    power: 20.0,
                },
            ],
            12.0,
        );
        assert_eq!(t.power_for(3), 20.0);
        assert_eq!(t.power_for(1), 16.0);
        assert_eq!(t.power_for(0), 12.0);
    }

    #[test]
    fn empty_table_is_always_base() {
        let t = PowerTable::new(Vec::new(), 9.0);
        assert_eq!(t.power_for(5), 9.0);
    }
}
