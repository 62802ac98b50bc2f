//! Configuration loading from holdbench.toml
//!
//! HoldBench configuration can be specified in a `holdbench.toml` file in the
//! project root. The file is discovered by walking up from the current
//! directory; every key has a default, so the file is optional.

use crate::driver::Sizes;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Name of the configuration file looked up during discovery
pub const CONFIG_FILE_NAME: &str = "holdbench.toml";

/// HoldBench configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct HoldConfig {
    /// Element counts
    #[serde(default)]
    pub sizes: SizesConfig,
    /// Runner configuration
    #[serde(default)]
    pub runner: RunnerConfig,
    /// Output configuration
    #[serde(default)]
    pub output: OutputConfig,
}

/// Element counts for each phase of the benchmark
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SizesConfig {
    /// Regular construction, copies, and the first factory call
    #[serde(default = "default_regular")]
    pub regular: usize,
    /// Consuming assignment; must exceed `regular`
    #[serde(default = "default_large")]
    pub large: usize,
    /// Addressable-value demonstrations
    #[serde(default = "default_demo")]
    pub demo: usize,
}

impl Default for SizesConfig {
    fn default() -> Self {
        Self {
            regular: default_regular(),
            large: default_large(),
            demo: default_demo(),
        }
    }
}

fn default_regular() -> usize {
    Sizes::default().regular
}
fn default_large() -> usize {
    Sizes::default().large
}
fn default_demo() -> usize {
    Sizes::default().demo
}

/// Runner configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RunnerConfig {
    /// Pin the benchmark thread to this CPU (Linux only)
    #[serde(default)]
    pub pin_cpu: Option<usize>,
}

/// Output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Output format: "human" or "json"
    #[serde(default = "default_format")]
    pub format: String,
    /// Write the report here instead of stdout
    #[serde(default)]
    pub path: Option<String>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: default_format(),
            path: None,
        }
    }
}

fn default_format() -> String {
    "human".to_string()
}

impl HoldConfig {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    /// Find `holdbench.toml` by walking up from the current directory
    pub fn discover() -> Option<PathBuf> {
        let mut dir = std::env::current_dir().ok()?;
        loop {
            let config_path = dir.join(CONFIG_FILE_NAME);
            if config_path.exists() {
                return Some(config_path);
            }
            if !dir.pop() {
                break;
            }
        }
        None
    }

    /// Element counts as driver sizes
    pub fn sizes(&self) -> Sizes {
        Sizes {
            regular: self.sizes.regular,
            large: self.sizes.large,
            demo: self.sizes.demo,
        }
    }

    /// Generate a default configuration as TOML string
    pub fn default_toml() -> String {
        r#"# HoldBench Configuration

[sizes]
# Elements for regular construction, copies and the first factory call (2^26)
regular = 67108864
# Elements for the consuming assignment; must be larger than `regular` (2^27)
large = 134217728
# Elements for the addressable-value demonstrations (2^28)
demo = 268435456

[runner]
# Pin the benchmark thread to one CPU (Linux only, uncomment to enable)
# pin_cpu = 0

[output]
# Output format: human or json
format = "human"
# Write the report to a file instead of stdout (uncomment to enable)
# path = "target/holdbench/report.json"
"#
        .to_string()
    }
}

/// Check that sizes describe a meaningful run
pub fn validate_sizes(sizes: &Sizes) -> anyhow::Result<()> {
    if sizes.regular == 0 {
        return Err(anyhow::anyhow!("Regular size must be greater than zero"));
    }
    if sizes.large <= sizes.regular {
        return Err(anyhow::anyhow!(
            "Large size ({}) must be greater than regular size ({})",
            sizes.large,
            sizes.regular
        ));
    }
    if sizes.demo == 0 {
        return Err(anyhow::anyhow!("Demo size must be greater than zero"));
    }
    Ok(())
}

/// Parse an element count (e.g., "1024", "2^27", "64Mi", "1G")
pub fn parse_element_count(s: &str) -> anyhow::Result<usize> {
    let s = s.trim();
    if s.is_empty() {
        return Err(anyhow::anyhow!("Empty element count"));
    }

    if let Some((base, exp)) = s.split_once('^') {
        let base: usize = base
            .trim()
            .parse()
            .map_err(|_| anyhow::anyhow!("Invalid base in element count: {}", base))?;
        let exp: u32 = exp
            .trim()
            .parse()
            .map_err(|_| anyhow::anyhow!("Invalid exponent in element count: {}", exp))?;
        return base
            .checked_pow(exp)
            .ok_or_else(|| anyhow::anyhow!("Element count overflows: {}", s));
    }

    // Find where the number ends and unit begins
    let (num_part, unit_part) = s
        .char_indices()
        .find(|(_, c)| c.is_alphabetic())
        .map(|(i, _)| s.split_at(i))
        .unwrap_or((s, ""));

    let value: usize = num_part
        .trim()
        .parse()
        .map_err(|_| anyhow::anyhow!("Invalid element count: {}", num_part))?;

    let multiplier: usize = match unit_part.to_lowercase().as_str() {
        "" => 1,
        "k" | "ki" => 1 << 10,
        "m" | "mi" => 1 << 20,
        "g" | "gi" => 1 << 30,
        _ => return Err(anyhow::anyhow!("Unknown element count unit: {}", unit_part)),
    };

    value
        .checked_mul(multiplier)
        .ok_or_else(|| anyhow::anyhow!("Element count overflows: {}", s))
}
