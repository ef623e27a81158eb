use crate::error::{PassableError, PassableResult};
use std::fmt;
use std::str::FromStr;

/// Stable namespaced identifier of a block type (or of a block group), e.g. `minecraft:oak_leaves`
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BlockIdentity(String);

impl BlockIdentity {
    /// Parse `namespace:path`
    pub fn parse(value: &str) -> PassableResult<Self> {
        let invalid = || PassableError::InvalidIdentity {
            value: value.to_string(),
        };

        let (namespace, path) = value.split_once(':').ok_or_else(invalid)?;
        if namespace.is_empty() || path.is_empty() {
            return Err(invalid());
        }
        if !namespace.chars().all(is_namespace_char) || !path.chars().all(is_path_char) {
            return Err(invalid());
        }

        Ok(BlockIdentity(value.to_string()))
    }

    /// Build from separate parts
    pub fn new(namespace: &str, path: &str) -> PassableResult<Self> {
        Self::parse(&format!("{}:{}", namespace, path))
    }

    pub fn namespace(&self) -> &str {
        self.0.split_once(':').map(|(ns, _)| ns).unwrap_or_default()
    }

    pub fn path(&self) -> &str {
        self.0.split_once(':').map(|(_, path)| path).unwrap_or_default()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn is_namespace_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '-' || c == '.'
}

fn is_path_char(c: char) -> bool {
    is_namespace_char(c) || c == '/'
}

impl fmt::Display for BlockIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for BlockIdentity {
    type Err = PassableError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for BlockIdentity {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Per-block-type flags the host consults for collision and occlusion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BlockFlags {
    pub has_collision: bool,
    pub can_occlude: bool,
}

impl BlockFlags {
    /// Flags of an ordinary full cube
    pub const SOLID: BlockFlags = BlockFlags {
        has_collision: true,
        can_occlude: true,
    };

    /// Flags applied while a passable rule is active
    pub const PASSABLE: BlockFlags = BlockFlags {
        has_collision: false,
        can_occlude: false,
    };
}

impl Default for BlockFlags {
    fn default() -> Self {
        BlockFlags::SOLID
    }
}

/// Coarse material class of a block type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BlockMaterial {
    Air,
    StructuralAir,
    BubbleColumn,
    Fire,
    Piston,
    Portal,
    Leaves,
    Snow,
    TopSnow,
    Plant,
    #[default]
    Solid,
}

impl BlockMaterial {
    pub fn is_air(self) -> bool {
        matches!(self, BlockMaterial::Air)
    }

    /// Materials whose blocks are never allowed to become passable
    pub fn is_structurally_blacklisted(self) -> bool {
        matches!(
            self,
            BlockMaterial::Air
                | BlockMaterial::StructuralAir
                | BlockMaterial::BubbleColumn
                | BlockMaterial::Fire
                | BlockMaterial::Piston
                | BlockMaterial::Portal
        )
    }

    pub fn is_snow(self) -> bool {
        matches!(self, BlockMaterial::Snow | BlockMaterial::TopSnow)
    }
}

/// Host sound event reference
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SoundEvent(pub String);

impl SoundEvent {
    pub fn new(name: impl Into<String>) -> Self {
        SoundEvent(name.into())
    }
}

/// Native sound parameters of a block type
#[derive(Debug, Clone, PartialEq)]
pub struct BlockSoundType {
    pub break_sound: SoundEvent,
    pub step_sound: SoundEvent,
    pub volume: f32,
    pub pitch: f32,
}

impl Default for BlockSoundType {
    fn default() -> Self {
        Self {
            break_sound: SoundEvent::new("block.stone.break"),
            step_sound: SoundEvent::new("block.stone.step"),
            volume: 1.0,
            pitch: 1.0,
        }
    }
}
