use super::board::CounterState;
use crate::error::ColorError;

/// Which side is on move. PlayerA always opens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PlayerColor {
    #[default]
    PlayerA,
    PlayerB,
}

impl PlayerColor {
    /// Get the other player
    pub fn other(self) -> PlayerColor {
        match self {
            PlayerColor::PlayerA => PlayerColor::PlayerB,
            PlayerColor::PlayerB => PlayerColor::PlayerA,
        }
    }

    pub fn counter_state(self) -> CounterState {
        match self {
            PlayerColor::PlayerA => CounterState::PlayerA,
            PlayerColor::PlayerB => CounterState::PlayerB,
        }
    }

    /// Index into [`Players`]: 0 for PlayerA, 1 for PlayerB.
    pub fn index(self) -> usize {
        match self {
            PlayerColor::PlayerA => 0,
            PlayerColor::PlayerB => 1,
        }
    }

    /// Name shown before any configuration has arrived.
    pub fn default_name(self) -> &'static str {
        match self {
            PlayerColor::PlayerA => "Player 1",
            PlayerColor::PlayerB => "Player 2",
        }
    }
}

/// Display name and `#RRGGBB` color for one player.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct PlayerIdentity {
    pub name: String,
    pub color_hex: String,
}

impl PlayerIdentity {
    pub fn new(name: impl Into<String>, color_hex: impl Into<String>) -> Self {
        PlayerIdentity {
            name: name.into(),
            color_hex: color_hex.into(),
        }
    }

    pub fn color(&self) -> Result<Rgb, ColorError> {
        Rgb::from_hex(&self.color_hex)
    }
}

/// The two configured players, indexed by [`PlayerColor::index`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Players([PlayerIdentity; 2]);

impl Players {
    pub fn new(player_a: PlayerIdentity, player_b: PlayerIdentity) -> Self {
        Players([player_a, player_b])
    }

    pub fn get(&self, color: PlayerColor) -> &PlayerIdentity {
        &self.0[color.index()]
    }

    pub fn player_a(&self) -> &PlayerIdentity {
        &self.0[0]
    }

    pub fn player_b(&self) -> &PlayerIdentity {
        &self.0[1]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    /// Parse `#RRGGBB` (either case).
    pub fn from_hex(hex: &str) -> Result<Rgb, ColorError> {
        let invalid = || ColorError::InvalidHex(hex.to_string());
        let digits = hex.strip_prefix('#').ok_or_else(invalid)?;
        if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid());
        }
        let channel =
            |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).map_err(|_| invalid());
        Ok(Rgb {
            r: channel(0)?,
            g: channel(2)?,
            b: channel(4)?,
        })
    }
}
