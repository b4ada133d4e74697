//! Population parameter registry.
//!
//! Single source of truth for per-population distribution parameters.
//! Callers construct and own one registry per simulation session; there is no
//! hidden global state. Mutation goes through [`PopulationRegistry::update`],
//! which validates against the field's domain and never leaves a spec
//! half-written.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Distribution parameters for one cell population.
///
/// Each channel is modeled as an independent univariate normal; all standard
/// deviations must be strictly positive, and `proportion` is this
/// population's independent share of the requested total event count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PopulationSpec {
    /// Unique name within the registry.
    pub name: String,
    /// Fraction in (0, 1] of the total event count allocated here.
    pub proportion: f64,
    /// Forward scatter mean.
    pub fsc_mean: f64,
    /// Forward scatter standard deviation (> 0).
    pub fsc_std: f64,
    /// Side scatter mean.
    pub ssc_mean: f64,
    /// Side scatter standard deviation (> 0).
    pub ssc_std: f64,
    /// FL1 fluorescence mean.
    pub fl1_mean: f64,
    /// FL1 fluorescence standard deviation (> 0).
    pub fl1_std: f64,
    /// FL2 fluorescence mean.
    pub fl2_mean: f64,
    /// FL2 fluorescence standard deviation (> 0).
    pub fl2_std: f64,
}

impl PopulationSpec {
    /// Construct a spec from `(mean, std)` pairs in FSC/SSC/FL1/FL2 order.
    pub fn new(
        name: impl Into<String>,
        proportion: f64,
        fsc: (f64, f64),
        ssc: (f64, f64),
        fl1: (f64, f64),
        fl2: (f64, f64),
    ) -> Self {
        Self {
            name: name.into(),
            proportion,
            fsc_mean: fsc.0,
            fsc_std: fsc.1,
            ssc_mean: ssc.0,
            ssc_std: ssc.1,
            fl1_mean: fl1.0,
            fl1_std: fl1.1,
            fl2_mean: fl2.0,
            fl2_std: fl2.1,
        }
    }

    /// Check every field against its domain.
    pub fn validate(&self) -> Result<()> {
        if self.name.is_empty() {
            return Err(Error::invalid_parameter("name", "must not be empty"));
        }
        for field in ParamField::ALL {
            field.validate(self.get(field))?;
        }
        Ok(())
    }

    /// Read the value of one parameter field.
    pub fn get(&self, field: ParamField) -> f64 {
        match field {
            ParamField::Proportion => self.proportion,
            ParamField::FscMean => self.fsc_mean,
            ParamField::FscStd => self.fsc_std,
            ParamField::SscMean => self.ssc_mean,
            ParamField::SscStd => self.ssc_std,
            ParamField::Fl1Mean => self.fl1_mean,
            ParamField::Fl1Std => self.fl1_std,
            ParamField::Fl2Mean => self.fl2_mean,
            ParamField::Fl2Std => self.fl2_std,
        }
    }

    fn set(&mut self, field: ParamField, value: f64) {
        match field {
            ParamField::Proportion => self.proportion = value,
            ParamField::FscMean => self.fsc_mean = value,
            ParamField::FscStd => self.fsc_std = value,
            ParamField::SscMean => self.ssc_mean = value,
            ParamField::SscStd => self.ssc_std = value,
            ParamField::Fl1Mean => self.fl1_mean = value,
            ParamField::Fl1Std => self.fl1_std = value,
            ParamField::Fl2Mean => self.fl2_mean = value,
            ParamField::Fl2Std => self.fl2_std = value,
        }
    }
}

/// Mutable parameter fields of a [`PopulationSpec`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamField {
    /// Share of the total event count, in (0, 1].
    Proportion,
    /// Forward scatter mean.
    FscMean,
    /// Forward scatter standard deviation.
    FscStd,
    /// Side scatter mean.
    SscMean,
    /// Side scatter standard deviation.
    SscStd,
    /// FL1 mean.
    Fl1Mean,
    /// FL1 standard deviation.
    Fl1Std,
    /// FL2 mean.
    Fl2Mean,
    /// FL2 standard deviation.
    Fl2Std,
}

impl ParamField {
    /// All fields, in display order.
    pub const ALL: [ParamField; 9] = [
        ParamField::Proportion,
        ParamField::FscMean,
        ParamField::FscStd,
        ParamField::SscMean,
        ParamField::SscStd,
        ParamField::Fl1Mean,
        ParamField::Fl1Std,
        ParamField::Fl2Mean,
        ParamField::Fl2Std,
    ];

    /// Lowercase field name, matching the `FromStr` spelling.
    pub fn name(self) -> &'static str {
        match self {
            ParamField::Proportion => "proportion",
            ParamField::FscMean => "fsc_mean",
            ParamField::FscStd => "fsc_std",
            ParamField::SscMean => "ssc_mean",
            ParamField::SscStd => "ssc_std",
            ParamField::Fl1Mean => "fl1_mean",
            ParamField::Fl1Std => "fl1_std",
            ParamField::Fl2Mean => "fl2_mean",
            ParamField::Fl2Std => "fl2_std",
        }
    }

    /// Validate a candidate value against this field's domain.
    ///
    /// Means may be any finite value; standard deviations must be strictly
    /// positive; `proportion` must lie in (0, 1].
    pub fn validate(self, value: f64) -> Result<()> {
        if !value.is_finite() {
            return Err(Error::invalid_parameter(self.name(), "must be finite"));
        }
        match self {
            ParamField::Proportion => {
                if value <= 0.0 || value > 1.0 {
                    return Err(Error::invalid_parameter(self.name(), "must be in (0, 1]"));
                }
            }
            ParamField::FscStd
            | ParamField::SscStd
            | ParamField::Fl1Std
            | ParamField::Fl2Std => {
                if value <= 0.0 {
                    return Err(Error::invalid_parameter(self.name(), "must be > 0"));
                }
            }
            _ => {}
        }
        Ok(())
    }
}

impl std::str::FromStr for ParamField {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        ParamField::ALL
            .into_iter()
            .find(|f| f.name() == s.to_ascii_lowercase())
            .ok_or_else(|| format!("unknown parameter field: {s:?}"))
    }
}

impl std::fmt::Display for ParamField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Ordered registry of population specs.
///
/// Iteration order is registration order, which fixes the row order of the
/// generated table. Populations are never removed once registered.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PopulationRegistry {
    populations: Vec<PopulationSpec>,
}

impl PopulationRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry with the three built-in populations.
    ///
    /// Parameters model typical lymphocyte / monocyte / granulocyte scatter
    /// and fluorescence profiles at proportions 0.6 / 0.3 / 0.1.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        for spec in [
            PopulationSpec::new("lymphocytes", 0.6, (8.0, 1.5), (15.0, 2.0), (30.0, 5.0), (10.0, 2.0)),
            PopulationSpec::new("monocytes", 0.3, (15.0, 3.0), (25.0, 3.0), (60.0, 8.0), (30.0, 5.0)),
            PopulationSpec::new("granulocytes", 0.1, (20.0, 4.0), (35.0, 4.0), (40.0, 6.0), (50.0, 7.0)),
        ] {
            // Built-in specs always pass validation.
            registry
                .register(spec)
                .unwrap_or_else(|e| unreachable!("built-in spec rejected: {e}"));
        }
        registry
    }

    /// Number of registered populations.
    pub fn len(&self) -> usize {
        self.populations.len()
    }

    /// Whether the registry has no populations.
    pub fn is_empty(&self) -> bool {
        self.populations.is_empty()
    }

    /// Look up a population by name.
    pub fn get(&self, name: &str) -> Result<&PopulationSpec> {
        self.populations
            .iter()
            .find(|p| p.name == name)
            .ok_or_else(|| Error::UnknownPopulation(name.to_string()))
    }

    /// All populations in registration order.
    pub fn list(&self) -> &[PopulationSpec] {
        &self.populations
    }

    /// Register a new population.
    ///
    /// The spec is validated as a whole; a duplicate name is rejected.
    pub fn register(&mut self, spec: PopulationSpec) -> Result<()> {
        spec.validate()?;
        if self.populations.iter().any(|p| p.name == spec.name) {
            return Err(Error::invalid_parameter(
                "name",
                format!("population {:?} is already registered", spec.name),
            ));
        }
        self.populations.push(spec);
        Ok(())
    }

    /// Update one field of a registered population.
    ///
    /// Validates `value` against the field's domain before touching the spec,
    /// so a rejected edit leaves the prior value in place. Returns the
    /// updated spec on success.
    pub fn update(&mut self, name: &str, field: ParamField, value: f64) -> Result<&PopulationSpec> {
        field.validate(value)?;
        let spec = self
            .populations
            .iter_mut()
            .find(|p| p.name == name)
            .ok_or_else(|| Error::UnknownPopulation(name.to_string()))?;
        spec.set(field, value);
        Ok(spec)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_registry_contents() {
        let registry = PopulationRegistry::with_defaults();
        assert_eq!(registry.len(), 3);

        let names: Vec<&str> = registry.list().iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["lymphocytes", "monocytes", "granulocytes"]);

        let lymph = registry.get("lymphocytes").unwrap();
        assert_eq!(lymph.proportion, 0.6);
        assert_eq!(lymph.fsc_mean, 8.0);
        assert_eq!(lymph.fl2_std, 2.0);
    }

    #[test]
    fn test_get_unknown_population() {
        let registry = PopulationRegistry::with_defaults();
        assert!(matches!(
            registry.get("nk_cells"),
            Err(Error::UnknownPopulation(_))
        ));
    }

    #[test]
    fn test_update_rejects_negative_std() {
        let mut registry = PopulationRegistry::with_defaults();
        let before = registry.get("lymphocytes").unwrap().fsc_std;

        let err = registry.update("lymphocytes", ParamField::FscStd, -1.0);
        assert!(matches!(err, Err(Error::InvalidParameter { .. })));

        // Prior value retained, no partial mutation.
        assert_eq!(registry.get("lymphocytes").unwrap().fsc_std, before);
    }

    #[test]
    fn test_update_proportion() {
        let mut registry = PopulationRegistry::with_defaults();
        registry
            .update("lymphocytes", ParamField::Proportion, 0.5)
            .unwrap();
        assert_eq!(registry.get("lymphocytes").unwrap().proportion, 0.5);
    }

    #[test]
    fn test_update_unknown_population() {
        let mut registry = PopulationRegistry::with_defaults();
        assert!(matches!(
            registry.update("nk_cells", ParamField::FscMean, 10.0),
            Err(Error::UnknownPopulation(_))
        ));
    }

    #[test]
    fn test_register_duplicate_name() {
        let mut registry = PopulationRegistry::with_defaults();
        let dup = PopulationSpec::new(
            "lymphocytes",
            0.2,
            (8.0, 1.5),
            (15.0, 2.0),
            (30.0, 5.0),
            (10.0, 2.0),
        );
        assert!(registry.register(dup).is_err());
        assert_eq!(registry.len(), 3);
    }

    #[test]
    fn test_register_custom_population() {
        let mut registry = PopulationRegistry::with_defaults();
        let spec = PopulationSpec::new(
            "nk_cells",
            0.05,
            (10.0, 2.0),
            (18.0, 2.5),
            (45.0, 6.0),
            (25.0, 4.0),
        );
        registry.register(spec).unwrap();
        assert_eq!(registry.len(), 4);
        assert_eq!(registry.list()[3].name, "nk_cells");
    }

    #[test]
    fn test_param_field_parse() {
        assert_eq!("fsc_std".parse::<ParamField>().unwrap(), ParamField::FscStd);
        assert_eq!(
            "PROPORTION".parse::<ParamField>().unwrap(),
            ParamField::Proportion
        );
        assert!("fl3_mean".parse::<ParamField>().is_err());
    }

    #[test]
    fn test_proportion_domain() {
        assert!(ParamField::Proportion.validate(1.0).is_ok());
        assert!(ParamField::Proportion.validate(0.0).is_err());
        assert!(ParamField::Proportion.validate(1.01).is_err());
        assert!(ParamField::Proportion.validate(f64::NAN).is_err());
    }
}
