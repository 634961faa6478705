//! Load-time configuration for the scrolling hex map.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use bevy::prelude::*;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Map dimensions, hex size, chunking and debug colors.
#[derive(Resource, Clone, Debug, Reflect, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct HexMapConfig {
    /// Map width in hexes. Truncated to a multiple of `chunk_width`.
    pub map_width: u32,
    /// Map depth in hexes. Truncated to a multiple of `chunk_depth`.
    pub map_depth: u32,
    /// Distance from a hex center to any of its corners.
    pub hex_radius: f32,
    /// Hex columns per chunk mesh.
    pub chunk_width: u32,
    /// Hex rows per chunk mesh.
    pub chunk_depth: u32,
    /// Vertex colors marking chunk edge columns.
    pub palette: DebugPalette,
}

/// Per-column debug colors, as 8-bit sRGBA.
#[derive(Clone, Debug, Reflect, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DebugPalette {
    /// Color of each chunk's first column.
    pub left_edge: [u8; 4],
    /// Color of each chunk's last column.
    pub right_edge: [u8; 4],
    /// Color of every other column.
    pub interior: [u8; 4],
}

impl Default for HexMapConfig {
    fn default() -> Self {
        Self {
            map_width: 64,
            map_depth: 32,
            hex_radius: 1.0,
            chunk_width: 16,
            chunk_depth: 16,
            palette: DebugPalette::default(),
        }
    }
}

impl Default for DebugPalette {
    fn default() -> Self {
        Self {
            left_edge: [128, 0, 0, 255],
            right_edge: [0, 128, 0, 255],
            interior: [0, 0, 128, 255],
        }
    }
}

impl DebugPalette {
    /// Color for hex column `x` of a chunk `width` columns wide.
    ///
    /// When a chunk is a single column wide, the right-edge color wins.
    pub fn column_color(&self, x: usize, width: usize) -> Srgba {
        let [r, g, b, a] = if x + 1 == width {
            self.right_edge
        } else if x == 0 {
            self.left_edge
        } else {
            self.interior
        };
        Srgba::rgba_u8(r, g, b, a)
    }
}

impl HexMapConfig {
    /// Whole chunks along the horizontal axis (remainder hexes are dropped).
    pub fn chunks_wide(&self) -> usize {
        (self.map_width / self.chunk_width.max(1)) as usize
    }

    /// Whole chunks along the depth axis (remainder hexes are dropped).
    pub fn chunks_deep(&self) -> usize {
        (self.map_depth / self.chunk_depth.max(1)) as usize
    }

    /// Rejects configurations that would produce degenerate geometry or an
    /// empty grid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.hex_radius.is_finite() || self.hex_radius <= 0.0 {
            return Err(ConfigError::Invalid {
                field: "hex_radius",
                reason: format!("must be a positive finite number, got {}", self.hex_radius),
            });
        }
        if self.chunk_width == 0 {
            return Err(ConfigError::Invalid {
                field: "chunk_width",
                reason: "must be at least 1".into(),
            });
        }
        if self.chunk_depth == 0 {
            return Err(ConfigError::Invalid {
                field: "chunk_depth",
                reason: "must be at least 1".into(),
            });
        }
        if self.chunks_wide() == 0 {
            return Err(ConfigError::Invalid {
                field: "map_width",
                reason: format!(
                    "{} hexes is narrower than one chunk ({})",
                    self.map_width, self.chunk_width
                ),
            });
        }
        if self.chunks_deep() == 0 {
            return Err(ConfigError::Invalid {
                field: "map_depth",
                reason: format!(
                    "{} hexes is shallower than one chunk ({})",
                    self.map_depth, self.chunk_depth
                ),
            });
        }
        Ok(())
    }
}

/// Reads a YAML file into any deserializable config type.
pub fn load_config<T: DeserializeOwned, P: AsRef<Path>>(path: P) -> Result<T, ConfigError> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let config = serde_yaml::from_reader(reader)?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(HexMapConfig::default().validate().is_ok());
    }

    #[test]
    fn chunk_counts_truncate_remainder() {
        let cfg = HexMapConfig {
            map_width: 40,
            map_depth: 31,
            ..default()
        };
        assert_eq!(cfg.chunks_wide(), 2);
        assert_eq!(cfg.chunks_deep(), 1);
    }

    #[test]
    fn rejects_non_positive_radius() {
        for radius in [0.0, -1.0, f32::NAN, f32::INFINITY] {
            let cfg = HexMapConfig {
                hex_radius: radius,
                ..default()
            };
            assert!(
                matches!(
                    cfg.validate(),
                    Err(ConfigError::Invalid {
                        field: "hex_radius",
                        ..
                    })
                ),
                "radius {radius} should be rejected"
            );
        }
    }

    #[test]
    fn rejects_zero_chunk_size() {
        let cfg = HexMapConfig {
            chunk_depth: 0,
            ..default()
        };
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::Invalid {
                field: "chunk_depth",
                ..
            })
        ));
    }

    #[test]
    fn rejects_zero_chunk_width() {
        let cfg = HexMapConfig {
            chunk_width: 0,
            ..default()
        };
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::Invalid {
                field: "chunk_width",
                ..
            })
        ));
    }

    #[test]
    fn rejects_map_smaller_than_a_chunk() {
        let cfg = HexMapConfig {
            map_width: 15,
            ..default()
        };
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::Invalid {
                field: "map_width",
                ..
            })
        ));
    }

    #[test]
    fn yaml_fills_missing_fields_from_default() {
        let cfg: HexMapConfig = serde_yaml::from_str("map_width: 128\nhex_radius: 2.5\n").unwrap();
        assert_eq!(cfg.map_width, 128);
        assert_eq!(cfg.hex_radius, 2.5);
        assert_eq!(cfg.chunk_width, 16);
        assert_eq!(cfg.palette, DebugPalette::default());
    }

    #[test]
    fn load_config_reports_missing_file() {
        let result: Result<HexMapConfig, _> = load_config("does/not/exist.yaml");
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }

    #[test]
    fn palette_picks_edge_colors() {
        let palette = DebugPalette::default();
        assert_eq!(palette.column_color(0, 16), Srgba::rgba_u8(128, 0, 0, 255));
        assert_eq!(palette.column_color(15, 16), Srgba::rgba_u8(0, 128, 0, 255));
        assert_eq!(palette.column_color(7, 16), Srgba::rgba_u8(0, 0, 128, 255));
        assert_eq!(palette.column_color(0, 1), Srgba::rgba_u8(0, 128, 0, 255));
    }
}
