//! Mechanism for loading and sharing the run configuration

use crate::{
    cuts::{CutConfiguration, Quantity},
    numeric::Float,
};
use eyre::{ensure, eyre, Result, WrapErr};
use particle_id::ParticleID;
use std::{fs, str::FromStr};
use strum::IntoEnumIterator;

/// Run configuration
#[derive(Clone, Debug, PartialEq)]
pub struct Configuration {
    /// Number of events to be generated
    pub num_events: usize,

    /// Number of primary particles in each event
    pub primaries_per_event: usize,

    /// Seed of the random number streams
    pub seed: u32,

    /// Name of the set of cuts, used as a prefix for histogram names
    pub name: String,

    /// Whether cut statistics and QA histograms should be filled
    pub qa_enabled: bool,

    /// Generation-level particle cuts
    pub cuts: CutConfiguration,
}
//
impl Configuration {
    /// Load the configuration from a file, check it, and print it out
    pub fn load(file_name: &str) -> Result<Self> {
        let config_str = fs::read_to_string(file_name)
            .wrap_err_with(|| format!("Could not read configuration file {file_name}"))?;
        let config = Self::parse(&config_str)?;
        config.print();
        Ok(config)
    }

    /// Decode and check a configuration
    ///
    /// Configuration items are the first non-whitespace chunk of text on each
    /// line, in a fixed order. Blank lines are ignored, and so is anything
    /// that follows the first chunk of each line, which leaves room for
    /// comments.
    ///
    pub fn parse(config_str: &str) -> Result<Self> {
        let mut config_iter = config_str
            .lines()
            .filter_map(|line| line.split_whitespace().next());

        // This closure fetches the next configuration item, tagging it with
        // the name of the configuration field which it is supposed to fill to
        // ease error reporting, and handling unexpected end-of-file too.
        let mut next_item = |name: &'static str| -> Result<ConfigItem> {
            config_iter
                .next()
                .map(|data| ConfigItem::new(name, data))
                .ok_or_else(|| eyre!("Missing configuration of {}", name))
        };

        // Run-level parameters
        let num_events = next_item("num_events")?.parse::<usize>()?;
        let primaries_per_event = next_item("primaries_per_event")?.parse::<usize>()?;
        let seed = next_item("seed")?.parse::<u32>()?;
        let name = next_item("name")?.data.to_owned();
        let qa_enabled = next_item("qa_enabled")?.parse_bool()?;

        // Flag cuts
        let mut cuts = CutConfiguration::default();
        cuts.set_require_charged(next_item("require_charged")?.parse_bool()?);
        cuts.set_require_neutral(next_item("require_neutral")?.parse_bool()?);
        cuts.set_require_primary(next_item("require_primary")?.parse_bool()?);
        cuts.set_require_secondary(next_item("require_secondary")?.parse_bool()?);

        // PDG code cut. The code and absolute flag are always present in the
        // file, but only used if the requirement is enabled.
        let require_pdg = next_item("require_pdg_code")?.parse_bool()?;
        let pdg_code = next_item("pdg_code")?.parse::<i32>()?;
        let pdg_absolute = next_item("pdg_absolute")?.parse_bool()?;
        if require_pdg {
            cuts.set_require_pdg_code(ParticleID::new(pdg_code), pdg_absolute);
        }

        // Range cuts, as (min, max) pairs in quantity order
        for quantity in Quantity::iter() {
            let min = next_item(quantity.min_item_name())?.parse::<Float>()?;
            let max = next_item(quantity.max_item_name())?.parse::<Float>()?;
            ensure!(
                !min.is_nan() && !max.is_nan(),
                "Range of {} must not contain NaN",
                quantity
            );
            cuts.set_range(quantity, min, max);
        }

        let config = Configuration {
            num_events,
            primaries_per_event,
            seed,
            name,
            qa_enabled,
            cuts,
        };

        // A sensible run must process at least one event...
        ensure!(config.num_events > 0, "Please generate at least one event");

        // ...and each event must contain something to apply the cuts to
        ensure!(
            config.primaries_per_event > 0,
            "Please generate at least one primary per event"
        );

        Ok(config)
    }

    /// Display the configuration
    pub fn print(&self) {
        println!("NEVENTS        : {}", self.num_events);
        println!("NPRIMARIES     : {}", self.primaries_per_event);
        println!("SEED           : {}", self.seed);
        println!("NAME           : {}", self.name);
        println!("QA             : {}", self.qa_enabled);
        println!("CHARGED        : {}", self.cuts.require_charged());
        println!("NEUTRAL        : {}", self.cuts.require_neutral());
        println!("PRIMARY        : {}", self.cuts.require_primary());
        println!("SECONDARY      : {}", self.cuts.require_secondary());
        match self.cuts.pdg_code_requirement() {
            Some(pdg) => println!(
                "PDG            : {}{}",
                pdg.code.id(),
                if pdg.absolute { " (absolute)" } else { "" }
            ),
            None => println!("PDG            : none"),
        }
        for quantity in Quantity::iter() {
            println!(
                "{:<15}: {} {}",
                quantity.to_string(),
                self.cuts.min(quantity),
                self.cuts.max(quantity)
            );
        }
    }
}

impl Quantity {
    /// Configuration item name of the lower bound
    fn min_item_name(self) -> &'static str {
        use Quantity::*;
        match self {
            ProdVtxX => "prod_vtx_x_min",
            ProdVtxY => "prod_vtx_y_min",
            ProdVtxZ => "prod_vtx_z_min",
            DecayVtxX => "decay_vtx_x_min",
            DecayVtxY => "decay_vtx_y_min",
            DecayVtxZ => "decay_vtx_z_min",
            DecayLength => "decay_length_min",
            DecayRxy => "decay_rxy_min",
        }
    }

    /// Configuration item name of the upper bound
    fn max_item_name(self) -> &'static str {
        use Quantity::*;
        match self {
            ProdVtxX => "prod_vtx_x_max",
            ProdVtxY => "prod_vtx_y_max",
            ProdVtxZ => "prod_vtx_z_max",
            DecayVtxX => "decay_vtx_x_max",
            DecayVtxY => "decay_vtx_y_max",
            DecayVtxZ => "decay_vtx_z_max",
            DecayLength => "decay_length_max",
            DecayRxy => "decay_rxy_max",
        }
    }
}

/// A value from the configuration file, tagged with the struct field which it
/// is supposed to map for error reporting purposes.
struct ConfigItem<'data> {
    name: &'static str,
    data: &'data str,
}
//
impl<'data> ConfigItem<'data> {
    /// Build a config item from a struct field tag and raw iterator data
    fn new(name: &'static str, data: &'data str) -> Self {
        Self { name, data }
    }

    /// Parse this data using Rust's standard parsing logic
    fn parse<T: FromStr>(self) -> Result<T>
    where
        <T as FromStr>::Err: std::error::Error + Send + Sync + 'static,
    {
        let name = self.name;
        self.data
            .parse::<T>()
            .wrap_err_with(|| format!("Could not parse configuration of {name}"))
    }

    /// Parse this data using special logic which handles Fortran's bool syntax
    fn parse_bool(self) -> Result<bool> {
        match self.data.to_lowercase().as_str() {
            // Handle FORTRAN booleans as a special case
            ".true." => Ok(true),
            ".false." => Ok(false),
            // Delegate other booleans to the standard Rust parser
            _ => self.parse::<bool>(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
        1000        num_events
        20          primaries_per_event
        42          seed

        genK0s      name
        .true.      qa_enabled
        .false.     require_charged
        true        require_neutral
        .FALSE.     require_primary
        false       require_secondary
        .true.      require_pdg_code
        310         pdg_code
        .false.     pdg_absolute
        -1e9        prod_vtx_x_min
        1e9         prod_vtx_x_max
        -1e9        prod_vtx_y_min
        1e9         prod_vtx_y_max
        -10         prod_vtx_z_min
        10          prod_vtx_z_max
        -1e9        decay_vtx_x_min
        1e9         decay_vtx_x_max
        -1e9        decay_vtx_y_min
        1e9         decay_vtx_y_max
        -1e9        decay_vtx_z_min
        1e9         decay_vtx_z_max
        0.5         decay_length_min
        1e9         decay_length_max
        -1          decay_rxy_min
        100         decay_rxy_max
    ";

    #[test]
    fn parse_sample() {
        let config = Configuration::parse(SAMPLE).unwrap();
        assert_eq!(config.num_events, 1000);
        assert_eq!(config.primaries_per_event, 20);
        assert_eq!(config.seed, 42);
        assert_eq!(config.name, "genK0s");
        assert!(config.qa_enabled);

        let cuts = &config.cuts;
        assert!(!cuts.require_charged());
        assert!(cuts.require_neutral());
        assert!(!cuts.require_primary());
        assert!(!cuts.require_secondary());
        let pdg = cuts.pdg_code_requirement().unwrap();
        assert_eq!(pdg.code.id(), 310);
        assert!(!pdg.absolute);
        assert_eq!(cuts.min(Quantity::ProdVtxZ), -10.);
        assert_eq!(cuts.max(Quantity::ProdVtxZ), 10.);
        assert_eq!(cuts.min(Quantity::DecayLength), 0.5);
        assert_eq!(cuts.max(Quantity::DecayRxy), 100.);
    }

    #[test]
    fn disabled_pdg_requirement() {
        let garbled = SAMPLE.replace(".true.      require_pdg_code", "maybe");
        let error = Configuration::parse(&garbled).unwrap_err();
        assert!(error.to_string().contains("require_pdg_code"));

        let disabled = SAMPLE.replace(".true.      require_pdg_code", "false");
        let config = Configuration::parse(&disabled).unwrap();
        assert_eq!(config.cuts.pdg_code_requirement(), None);
    }

    #[test]
    fn truncated_file() {
        let truncated = SAMPLE.lines().take(9).collect::<Vec<_>>().join("\n");
        let error = Configuration::parse(&truncated).unwrap_err();
        assert!(error.to_string().contains("require_secondary"));
    }

    #[test]
    fn no_events() {
        let error = Configuration::parse(&SAMPLE.replacen("1000", "0", 1)).unwrap_err();
        let message = error.to_string();
        assert!(message.contains("at least one event"), "{message}");
        assert!(!message.contains("Missing"), "{message}");
    }

    #[test]
    fn shipped_configuration() {
        let config = Configuration::parse(include_str!("../valeurs")).unwrap();
        assert_eq!(config.name, "genK0s");
        assert_eq!(config.cuts.min(Quantity::DecayLength), 0.5);
        assert_eq!(config.cuts.max(Quantity::DecayRxy), 100.);
    }
}
