//! Parent/weld mixing.

use crate::schema::{Alloy, AlloyOption, AlloyStore, Element};

/// Blend `parent` and `weld` by `dilution` percent of weld metal.
///
/// Each element ends up at `parent * (1 - d) + weld * d` with `d = dilution / 100`.
/// Elements present on only one side count as zero on the other. Parent
/// element order is kept; weld-only elements follow in weld order.
pub fn mix_alloys(parent: &Alloy, weld: &Alloy, dilution: f64) -> Alloy {
    let d = dilution / 100.0;

    let mut symbols: Vec<&str> = parent.compositions.iter().map(|e| e.symbol.as_str()).collect();
    for e in &weld.compositions {
        if !symbols.contains(&e.symbol.as_str()) {
            symbols.push(e.symbol.as_str());
        }
    }

    let compositions = symbols
        .into_iter()
        .map(|symbol| {
            let weight = parent.weight_of(symbol) * (1.0 - d) + weld.weight_of(symbol) * d;
            Element::new(symbol, weight)
        })
        .collect();

    Alloy {
        name: format!("{}+{}", parent.name, weld.name),
        compositions,
    }
}

impl AlloyStore {
    pub fn single(parent: Alloy) -> Self {
        Self {
            alloy_option: AlloyOption::Single,
            parent,
            weld: None,
            mix: None,
            dilution: 0.0,
        }
    }

    pub fn mixed(parent: Alloy, weld: Alloy, dilution: f64) -> Self {
        let mut store = Self {
            alloy_option: AlloyOption::Mix,
            parent,
            weld: Some(weld),
            mix: None,
            dilution,
        };
        store.update_mix();
        store
    }

    /// Recompute `mix` from parent, weld and dilution.
    ///
    /// Clears `mix` in single-alloy mode or when no weld is set.
    pub fn update_mix(&mut self) {
        self.mix = match (self.alloy_option, &self.weld) {
            (AlloyOption::Mix, Some(weld)) => Some(mix_alloys(&self.parent, weld, self.dilution)),
            _ => None,
        };
    }

    /// Alloy the simulation would run with.
    pub fn active_alloy(&self) -> &Alloy {
        match (self.alloy_option, &self.mix) {
            (AlloyOption::Mix, Some(mix)) => mix,
            _ => &self.parent,
        }
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn mixed_weight_lies_between_sources(
            p in 0.0_f64..5.0,
            w in 0.0_f64..5.0,
            dilution in 0.0_f64..=100.0,
        ) {
            let parent = Alloy { name: "p".to_string(), compositions: vec![Element::new("C", p)] };
            let weld = Alloy { name: "w".to_string(), compositions: vec![Element::new("C", w)] };
            let c = mix_alloys(&parent, &weld, dilution).weight_of("C");
            prop_assert!(c >= p.min(w) - 1e-12);
            prop_assert!(c <= p.max(w) + 1e-12);
        }
    }
}
