use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter};

/// A card from the Italian 40-card deck, as the server describes it.
/// Opaque to this layer beyond equality and the asset key it maps to.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct Card {
    pub suit: Suit,
    pub rank: Rank,
    pub value: u8,
}

impl Card {
    /// Lookup key for the rendering layer's asset table, e.g. `7_coins`.
    pub fn asset_key(&self) -> String {
        format!("{}_{}", self.rank.asset_name(), self.suit.asset_name())
    }
}

impl std::fmt::Display for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{} of {} ({})", self.rank, self.suit, self.value)
    }
}

#[derive(Debug, Serialize, Deserialize, Display, EnumIter, Clone, Copy, PartialEq, Eq)]
pub enum Suit {
    Coins,
    Cups,
    Swords,
    Clubs,
}

impl Suit {
    fn asset_name(&self) -> &'static str {
        match self {
            Suit::Coins => "coins",
            Suit::Cups => "cups",
            Suit::Swords => "swords",
            Suit::Clubs => "clubs",
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Display, EnumIter, Clone, Copy, PartialEq, Eq)]
pub enum Rank {
    Ace,
    Two,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Jack,
    Knight,
    King,
}

impl Rank {
    fn asset_name(&self) -> &'static str {
        match self {
            Rank::Ace => "ace",
            Rank::Two => "2",
            Rank::Three => "3",
            Rank::Four => "4",
            Rank::Five => "5",
            Rank::Six => "6",
            Rank::Seven => "7",
            Rank::Jack => "jack",
            Rank::Knight => "knight",
            Rank::King => "king",
        }
    }
}

/// One legal capture combination for a card play, in server order.
pub type CaptureOption = Vec<Card>;

/// Wire form of a capture selection: `-1` means play without capturing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureChoice {
    NoCapture,
    At(usize),
}

impl CaptureChoice {
    pub fn wire_index(&self) -> i32 {
        match self {
            CaptureChoice::NoCapture => -1,
            CaptureChoice::At(i) => *i as i32,
        }
    }
}

impl std::fmt::Display for CaptureChoice {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.wire_index())
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct PlayerState {
    pub name: String,
    pub hand: Vec<Card>,
    pub captured: usize,
    pub scopas: usize,
}

/// Point-in-time copy of the full game state. A new snapshot always replaces
/// the previous one wholesale, there is no partial merge.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct GameStateSnapshot {
    pub table: Vec<Card>,
    pub player1: PlayerState,
    pub player2: PlayerState,
    pub current_player: String,
    pub deck_size: usize,
    pub round_over: bool,
}

impl GameStateSnapshot {
    pub fn current_hand(&self) -> &[Card] {
        if self.player1.name == self.current_player {
            &self.player1.hand
        } else {
            &self.player2.hand
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ScoreReport {
    pub player1_score: i32,
    pub player2_score: i32,
}
