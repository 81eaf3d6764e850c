//! Session validation logic.

use std::collections::HashSet;

use sc_core::{
    CoreError, Tolerances, ensure_finite, ensure_in_range, ensure_percent, ensure_positive,
    within_limit,
};

use crate::schema::{Alloy, AlloyOption, AlloyStore, Configurations, SessionSnapshot};

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error(transparent)]
    Numeric(#[from] CoreError),

    #[error("Duplicate element: {symbol} in alloy '{alloy}'")]
    DuplicateElement { symbol: String, alloy: String },

    #[error("Empty element symbol in alloy '{alloy}'")]
    EmptySymbol { alloy: String },

    #[error("Invalid value: {field} = {value} ({reason})")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Mix option requires a weld alloy")]
    MissingWeld,
}

pub fn validate_snapshot(snapshot: &SessionSnapshot) -> Result<(), ValidationError> {
    validate_configurations(&snapshot.configurations)?;
    validate_alloy_store(&snapshot.alloy_store)
}

pub fn validate_configurations(config: &Configurations) -> Result<(), ValidationError> {
    ensure_positive(config.grain_size, "grain_size")?;
    ensure_percent(config.nucleation_start, "nucleation_start")?;
    ensure_percent(config.nucleation_finish, "nucleation_finish")?;

    if config.nucleation_start <= 0.0 || config.nucleation_start >= config.nucleation_finish {
        return Err(ValidationError::InvalidValue {
            field: "nucleation_start".to_string(),
            value: config.nucleation_start.to_string(),
            reason: format!(
                "must be above 0 and below nucleation_finish ({})",
                config.nucleation_finish
            ),
        });
    }
    if config.nucleation_finish >= 100.0 {
        return Err(ValidationError::InvalidValue {
            field: "nucleation_finish".to_string(),
            value: config.nucleation_finish.to_string(),
            reason: "must be below 100".to_string(),
        });
    }

    ensure_finite(config.ms_temp, "ms_temp")?;
    ensure_finite(config.ms_rate_param, "ms_rate_param")?;
    ensure_finite(config.bs_temp, "bs_temp")?;
    ensure_finite(config.ae1_temp, "ae1_temp")?;
    ensure_finite(config.ae3_temp, "ae3_temp")?;
    ensure_finite(config.cf_value, "cf_value")?;
    ensure_finite(config.ceut_value, "ceut_value")?;
    ensure_positive(config.start_temp, "start_temp")?;
    ensure_positive(config.cct_cooling_rate, "cct_cooling_rate")?;

    if !config.auto_calculate_ae && config.ae1_temp > config.ae3_temp {
        return Err(ValidationError::InvalidValue {
            field: "ae1_temp".to_string(),
            value: config.ae1_temp.to_string(),
            reason: format!("must not exceed ae3_temp ({})", config.ae3_temp),
        });
    }
    if !config.auto_calculate_xfe {
        ensure_in_range(config.xfe_value, 0.0, 1.0, "xfe_value")?;
    }

    Ok(())
}

pub fn validate_alloy_store(store: &AlloyStore) -> Result<(), ValidationError> {
    ensure_percent(store.dilution, "dilution")?;
    validate_alloy(&store.parent)?;
    if let Some(weld) = &store.weld {
        validate_alloy(weld)?;
    }
    if let Some(mix) = &store.mix {
        validate_alloy(mix)?;
    }
    if store.alloy_option == AlloyOption::Mix && store.weld.is_none() {
        return Err(ValidationError::MissingWeld);
    }
    Ok(())
}

pub fn validate_alloy(alloy: &Alloy) -> Result<(), ValidationError> {
    let mut seen = HashSet::new();
    for element in &alloy.compositions {
        if element.symbol.trim().is_empty() {
            return Err(ValidationError::EmptySymbol {
                alloy: alloy.name.clone(),
            });
        }
        if !seen.insert(element.symbol.as_str()) {
            return Err(ValidationError::DuplicateElement {
                symbol: element.symbol.clone(),
                alloy: alloy.name.clone(),
            });
        }
        ensure_percent(element.weight, "element weight")?;
    }

    let total = alloy.total_weight();
    if !within_limit(total, 100.0, Tolerances::default()) {
        return Err(ValidationError::InvalidValue {
            field: format!("{} total weight", alloy.name),
            value: total.to_string(),
            reason: "must not exceed 100 wt%".to_string(),
        });
    }

    Ok(())
}
