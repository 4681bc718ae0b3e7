use std::fmt;

use crate::{
    error::ConfigError,
    quaternion::Quaternion,
};


/// Parsing states.
enum Parse {
    None,
    First,
    Second,
    Seed,
}


/// Settings for the demo walk-through.
#[derive(Clone, Debug)]
pub struct Config {
    pub q1: Quaternion,
    pub q2: Quaternion,
    pub seed: u64,
}
impl Config {
    /// Create a new Config with the specified command line arguments,
    /// program name excluded.
    ///
    /// `-q1 w x y z` and `-q2 w x y z` replace the operands,
    /// `-seed n` seeds the random rotation.
    pub fn new(args: Vec<String>) -> Result<Config, ConfigError> {
        let mut parser = Parse::None;
        let mut cfg    = Config::default();
        let mut comps  = Vec::with_capacity(4);

        for arg in args.into_iter() {
            match arg.as_str() {
                "-q1" => {
                    finish(&parser, &mut cfg, &mut comps)?;
                    parser = Parse::First;
                    continue;
                }
                "-q2" => {
                    finish(&parser, &mut cfg, &mut comps)?;
                    parser = Parse::Second;
                    continue;
                }
                "-seed" => {
                    finish(&parser, &mut cfg, &mut comps)?;
                    parser = Parse::Seed;
                    continue;
                }
                _ => {},
            }
            match parser {
                Parse::First | Parse::Second => {
                    if comps.len() == 4 {
                        return Err(
                            ConfigError::UnknownFlag(arg)
                        );
                    }
                    if let Ok(v) = arg.parse::<f64>() {
                        comps.push(v);
                    }
                    else {
                        return Err(
                            ConfigError::InvalidComponent(arg)
                        );
                    }
                }
                Parse::Seed => {
                    if let Ok(seed) = arg.parse::<u64>() {
                        cfg.seed = seed;
                        parser = Parse::None;
                    }
                    else {
                        return Err(
                            ConfigError::InvalidSeed(arg)
                        );
                    }
                }
                Parse::None => {
                    return Err(
                        ConfigError::UnknownFlag(arg)
                    );
                }
            }
        }
        finish(&parser, &mut cfg, &mut comps)?;

        Ok(cfg)
    }
}

/// Store the components collected for `-q1`/`-q2`. A `-seed` still
/// waiting for its value is an error.
fn finish(parser: &Parse, cfg: &mut Config, comps: &mut Vec<f64>) -> Result<(), ConfigError> {
    let (flag, target) = match parser {
        Parse::First  => ("-q1", &mut cfg.q1),
        Parse::Second => ("-q2", &mut cfg.q2),
        Parse::Seed => {
            return Err(
                ConfigError::InvalidSeed(String::new())
            );
        }
        Parse::None => return Ok(()),
    };
    if comps.len() != 4 {
        return Err(
            ConfigError::MissingComponents(flag.to_string(), comps.len())
        );
    }
    *target = Quaternion::new(comps[0], comps[1], comps[2], comps[3]);
    comps.clear();
    Ok(())
}

impl fmt::Display for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "
            \rQuaternion 1: {}
            \rQuaternion 2: {}
            \rSeed: {}",
            self.q1,
            self.q2,
            self.seed,
        )
    }
}
impl Default for Config {
    fn default() -> Self {
        Self {
            q1: Quaternion::new(1.0, 2.0, 3.0, 4.0),
            q2: Quaternion::new(5.0, 6.0, 7.0, 8.0),
            seed: 555555555,
        }
    }
}


#[cfg(test)]
fn args(s: &str) -> Vec<String> {
    s.split_whitespace().map(String::from).collect()
}

#[test]
fn defaults_match_demo() {
    let cfg = Config::new(Vec::new()).unwrap();
    assert!(cfg.q1 == Quaternion::new(1.0, 2.0, 3.0, 4.0));
    assert!(cfg.q2 == Quaternion::new(5.0, 6.0, 7.0, 8.0));
    assert_eq!(cfg.seed, 555555555);
}

#[test]
fn parses_operands_and_seed() {
    let cfg = Config::new(args("-q2 0 1 0 0 -seed 9 -q1 1 -0.5 2e-3 4")).unwrap();
    assert!(cfg.q1 == Quaternion::new(1.0, -0.5, 0.002, 4.0));
    assert!(cfg.q2 == Quaternion::new(0.0, 1.0, 0.0, 0.0));
    assert_eq!(cfg.seed, 9);
}

#[test]
fn rejects_bad_arguments() {
    assert!(matches!(
        Config::new(args("-q1 1 2 3")),
        Err(ConfigError::MissingComponents(flag, 3)) if flag == "-q1"
    ));
    assert!(matches!(
        Config::new(args("-q1 1 2 three 4")),
        Err(ConfigError::InvalidComponent(arg)) if arg == "three"
    ));
    assert!(matches!(
        Config::new(args("-seed -1")),
        Err(ConfigError::InvalidSeed(_))
    ));
    assert!(matches!(
        Config::new(args("-seed")),
        Err(ConfigError::InvalidSeed(arg)) if arg.is_empty()
    ));
    assert!(matches!(
        Config::new(args("-seed -q1 1 2 3 4")),
        Err(ConfigError::InvalidSeed(arg)) if arg.is_empty()
    ));
    assert!(matches!(
        Config::new(args("-q1 1 2 3 4 5")),
        Err(ConfigError::UnknownFlag(arg)) if arg == "5"
    ));
    assert!(matches!(
        Config::new(args("stray")),
        Err(ConfigError::UnknownFlag(_))
    ));
}
