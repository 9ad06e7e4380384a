//! Pure windowed reduction of reading streams. No I/O; callers fetch the
//! readings and device lookup themselves and log whatever this module
//! reports back.

use std::collections::{BTreeMap, HashMap};
use uuid::Uuid;

use crate::models::{CategoryUsage, DeviceCategory, EnergyReading, UsageTotals};
use crate::window::TimeWindow;

/// Kahan compensated summation. Plain f64 accumulation drifts once reading
/// counts get large; the compensation term keeps the running total stable.
#[derive(Debug, Clone, Copy, Default)]
struct KahanSum {
    sum: f64,
    compensation: f64,
}

impl KahanSum {
    fn add(&mut self, value: f64) {
        let y = value - self.compensation;
        let t = self.sum + y;
        self.compensation = (t - self.sum) - y;
        self.sum = t;
    }

    fn value(&self) -> f64 {
        self.sum
    }
}

/// Grouped aggregation output. `unresolved` carries the device ids of
/// readings that could not be joined to a category; those readings are
/// excluded from `rows` and the caller decides how to report them.
#[derive(Debug, Clone)]
pub struct CategoryBreakdown {
    pub rows: Vec<CategoryUsage>,
    pub unresolved: Vec<Uuid>,
}

/// Sums energy and cost over the readings inside `window` (both ends
/// inclusive). An empty match yields zero totals, never an error.
pub fn window_totals(readings: &[EnergyReading], window: &TimeWindow) -> UsageTotals {
    let mut energy = KahanSum::default();
    let mut cost = KahanSum::default();

    for reading in readings {
        if !window.contains(reading.timestamp) {
            continue;
        }
        energy.add(reading.energy_kwh);
        cost.add(reading.cost);
    }

    UsageTotals {
        total_energy: energy.value(),
        total_cost: cost.value(),
    }
}

/// Sums energy and cost per device category over the readings inside
/// `window`. Categories with no matching readings are omitted; rows are
/// ordered by category. Readings whose device id is missing from
/// `categories` are excluded and reported via `unresolved`.
pub fn window_totals_by_category(
    readings: &[EnergyReading],
    categories: &HashMap<Uuid, DeviceCategory>,
    window: &TimeWindow,
) -> CategoryBreakdown {
    let mut groups: BTreeMap<DeviceCategory, (KahanSum, KahanSum)> = BTreeMap::new();
    let mut unresolved = Vec::new();

    for reading in readings {
        if !window.contains(reading.timestamp) {
            continue;
        }
        match categories.get(&reading.device_id) {
            Some(category) => {
                let (energy, cost) = groups.entry(*category).or_default();
                energy.add(reading.energy_kwh);
                cost.add(reading.cost);
            }
            None => unresolved.push(reading.device_id),
        }
    }

    let rows = groups
        .into_iter()
        .map(|(category, (energy, cost))| CategoryUsage {
            category,
            total_energy: energy.value(),
            total_cost: cost.value(),
        })
        .collect();

    CategoryBreakdown { rows, unresolved }
}
