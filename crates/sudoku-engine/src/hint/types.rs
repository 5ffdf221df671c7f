//! Techniques, difficulty bands, and the hint variants.

use crate::board::Position;
use crate::topology::{ChuteKind, UnitRef};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Solving technique, declared in ascending difficulty order so the derived
/// `Ord` matches the numeric scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Technique {
    IncorrectValue,
    MissingCandidate,
    NakedSingle,
    LastRemainingInBox,
    LastRemainingInRow,
    LastRemainingInColumn,
    HiddenSingle,
    NakedPair,
    PointingPair,
    BoxLineReduction,
    HiddenPair,
    NakedTriple,
    HiddenTriple,
    NakedQuad,
    HiddenQuad,
    XWing,
    YWing,
    ChuteRemotePairs,
    SimpleColoring,
    Swordfish,
}

impl Technique {
    /// Every technique in battery order (ascending difficulty, table order
    /// on ties).
    pub const ALL: [Technique; 20] = [
        Technique::IncorrectValue,
        Technique::MissingCandidate,
        Technique::NakedSingle,
        Technique::LastRemainingInBox,
        Technique::LastRemainingInRow,
        Technique::LastRemainingInColumn,
        Technique::HiddenSingle,
        Technique::NakedPair,
        Technique::PointingPair,
        Technique::BoxLineReduction,
        Technique::HiddenPair,
        Technique::NakedTriple,
        Technique::HiddenTriple,
        Technique::NakedQuad,
        Technique::HiddenQuad,
        Technique::XWing,
        Technique::YWing,
        Technique::ChuteRemotePairs,
        Technique::SimpleColoring,
        Technique::Swordfish,
    ];

    /// Numeric difficulty on the 0-99 scale. The values are contractual:
    /// the scorer and the generator's acceptance bands depend on them.
    pub fn difficulty(self) -> u8 {
        match self {
            Technique::IncorrectValue => 0,
            Technique::MissingCandidate => 0,
            Technique::NakedSingle => 1,
            Technique::LastRemainingInBox => 3,
            Technique::LastRemainingInRow => 4,
            Technique::LastRemainingInColumn => 5,
            Technique::HiddenSingle => 7,
            Technique::NakedPair => 9,
            Technique::PointingPair => 12,
            Technique::BoxLineReduction => 14,
            Technique::HiddenPair => 18,
            Technique::NakedTriple => 22,
            Technique::HiddenTriple => 28,
            Technique::NakedQuad => 35,
            Technique::HiddenQuad => 42,
            Technique::XWing => 46,
            Technique::YWing => 50,
            Technique::ChuteRemotePairs => 52,
            Technique::SimpleColoring => 54,
            Technique::Swordfish => 62,
        }
    }

    /// The wire name of this technique.
    pub fn name(self) -> &'static str {
        match self {
            Technique::IncorrectValue => "incorrect_value",
            Technique::MissingCandidate => "missing_candidate",
            Technique::NakedSingle => "naked_single",
            Technique::LastRemainingInBox => "last_remaining_in_box",
            Technique::LastRemainingInRow => "last_remaining_in_row",
            Technique::LastRemainingInColumn => "last_remaining_in_column",
            Technique::HiddenSingle => "hidden_single",
            Technique::NakedPair => "naked_pairs",
            Technique::PointingPair => "pointing_pairs",
            Technique::BoxLineReduction => "box_line_reduction",
            Technique::HiddenPair => "hidden_pairs",
            Technique::NakedTriple => "naked_triples",
            Technique::HiddenTriple => "hidden_triples",
            Technique::NakedQuad => "naked_quads",
            Technique::HiddenQuad => "hidden_quads",
            Technique::XWing => "x_wing",
            Technique::YWing => "y_wing",
            Technique::ChuteRemotePairs => "chute_remote_pairs",
            Technique::SimpleColoring => "simple_coloring",
            Technique::Swordfish => "swordfish",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Technique::ALL.into_iter().find(|t| t.name() == name)
    }

    pub fn category(self) -> Category {
        Category::from_difficulty(self.difficulty())
    }
}

impl fmt::Display for Technique {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Difficulty of a named technique; unknown names rate 50.
pub fn technique_difficulty(name: &str) -> u8 {
    Technique::from_name(name).map_or(50, Technique::difficulty)
}

/// Coarse difficulty band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Category {
    Error,
    Trivial,
    Basic,
    Intermediate,
    Tough,
    Diabolical,
    Extreme,
    Master,
    Grandmaster,
}

impl Category {
    /// Band lookup. 100 (unsolvable by logic) classifies as grandmaster.
    pub fn from_difficulty(difficulty: u8) -> Self {
        match difficulty {
            0 => Category::Error,
            1..=8 => Category::Trivial,
            9..=25 => Category::Basic,
            26..=45 => Category::Intermediate,
            46..=68 => Category::Tough,
            69..=84 => Category::Diabolical,
            85..=92 => Category::Extreme,
            93..=96 => Category::Master,
            _ => Category::Grandmaster,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Category::Error => "error",
            Category::Trivial => "trivial",
            Category::Basic => "basic",
            Category::Intermediate => "intermediate",
            Category::Tough => "tough",
            Category::Diabolical => "diabolical",
            Category::Extreme => "extreme",
            Category::Master => "master",
            Category::Grandmaster => "grandmaster",
        }
    }

    /// Generation preset: band midpoint and tolerance. `None` for the error
    /// pseudo-category, which is not a generation target.
    pub fn target_band(self) -> Option<(f32, f32)> {
        match self {
            Category::Error => None,
            Category::Trivial => Some((4.0, 4.0)),
            Category::Basic => Some((17.0, 8.0)),
            Category::Intermediate => Some((35.5, 9.5)),
            Category::Tough => Some((56.0, 12.0)),
            Category::Diabolical => Some((76.0, 8.0)),
            Category::Extreme => Some((88.0, 4.0)),
            Category::Master => Some((94.0, 2.0)),
            Category::Grandmaster => Some((98.0, 1.0)),
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Band lookup on the 0-100 scale.
pub fn difficulty_to_category(difficulty: u8) -> Category {
    Category::from_difficulty(difficulty)
}

/// One candidate digit struck from one square.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Elimination {
    pub square: Position,
    pub digit: u8,
}

/// Which simple-coloring rule fired.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColoringRule {
    /// Two squares of one color share a unit: that color is false.
    Rule2,
    /// An outside candidate sees both colors.
    Rule4,
}

/// A square's color in a simple-coloring component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColoredSquare {
    pub square: Position,
    /// 1 or 2; the two parities of the conjugate chain.
    pub color: u8,
}

/// The next human-style deduction, tagged by technique.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Hint {
    /// A placed digit disagrees with the unique solution.
    IncorrectValue {
        square: Position,
        actual: u8,
        expected: u8,
    },
    /// A pencil-mark set is missing the digit the square must take.
    MissingCandidate { square: Position, digit: u8 },
    /// A single placement: naked single, last-remaining, or hidden single.
    SingleCell {
        technique: Technique,
        square: Position,
        digit: u8,
        unit: Option<UnitRef>,
    },
    NakedSet {
        technique: Technique,
        squares: Vec<Position>,
        digits: Vec<u8>,
        unit: UnitRef,
        eliminations: Vec<Elimination>,
    },
    HiddenSet {
        technique: Technique,
        squares: Vec<Position>,
        digits: Vec<u8>,
        unit: UnitRef,
        eliminations: Vec<Elimination>,
    },
    /// Pointing pairs or box/line reduction: a digit confined to the
    /// intersection of the primary and secondary unit.
    IntersectionRemoval {
        technique: Technique,
        digit: u8,
        squares: Vec<Position>,
        primary_unit: UnitRef,
        secondary_unit: UnitRef,
        eliminations: Vec<Elimination>,
    },
    XWing {
        digit: u8,
        corners: [Position; 4],
        base_units: [UnitRef; 2],
        cover_units: [UnitRef; 2],
        eliminations: Vec<Elimination>,
    },
    Swordfish {
        digit: u8,
        squares: Vec<Position>,
        base_units: [UnitRef; 3],
        cover_units: [UnitRef; 3],
        eliminations: Vec<Elimination>,
    },
    YWing {
        pivot: Position,
        pincers: [Position; 2],
        candidate_a: u8,
        candidate_b: u8,
        candidate_c: u8,
        eliminations: Vec<Elimination>,
    },
    ChuteRemotePairs {
        digits: (u8, u8),
        remote_pair: [Position; 2],
        chute_kind: ChuteKind,
        third_box_squares: Vec<Position>,
        present_digit: u8,
        absent_digit: u8,
        eliminations: Vec<Elimination>,
    },
    SimpleColoring {
        digit: u8,
        chain: Vec<Position>,
        colors: Vec<ColoredSquare>,
        rule: ColoringRule,
        /// Rule 2: a unit holding two same-colored squares.
        conflict_unit: Option<UnitRef>,
        /// Rule 4: the first outside square seeing both colors.
        witness: Option<Position>,
        eliminations: Vec<Elimination>,
    },
}

impl Hint {
    pub fn technique(&self) -> Technique {
        match self {
            Hint::IncorrectValue { .. } => Technique::IncorrectValue,
            Hint::MissingCandidate { .. } => Technique::MissingCandidate,
            Hint::SingleCell { technique, .. } => *technique,
            Hint::NakedSet { technique, .. } => *technique,
            Hint::HiddenSet { technique, .. } => *technique,
            Hint::IntersectionRemoval { technique, .. } => *technique,
            Hint::XWing { .. } => Technique::XWing,
            Hint::Swordfish { .. } => Technique::Swordfish,
            Hint::YWing { .. } => Technique::YWing,
            Hint::ChuteRemotePairs { .. } => Technique::ChuteRemotePairs,
            Hint::SimpleColoring { .. } => Technique::SimpleColoring,
        }
    }

    pub fn difficulty(&self) -> u8 {
        self.technique().difficulty()
    }

    /// The eliminations this hint would apply, if it is an elimination hint.
    pub fn eliminations(&self) -> &[Elimination] {
        match self {
            Hint::NakedSet { eliminations, .. }
            | Hint::HiddenSet { eliminations, .. }
            | Hint::IntersectionRemoval { eliminations, .. }
            | Hint::XWing { eliminations, .. }
            | Hint::Swordfish { eliminations, .. }
            | Hint::YWing { eliminations, .. }
            | Hint::ChuteRemotePairs { eliminations, .. }
            | Hint::SimpleColoring { eliminations, .. } => eliminations,
            _ => &[],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contractual_difficulties() {
        assert_eq!(technique_difficulty("naked_single"), 1);
        assert_eq!(technique_difficulty("pointing_pairs"), 12);
        assert_eq!(technique_difficulty("naked_pairs"), 9);
        assert_eq!(technique_difficulty("hidden_pairs"), 18);
        assert_eq!(technique_difficulty("x_wing"), 46);
        assert_eq!(technique_difficulty("y_wing"), 50);
        assert_eq!(technique_difficulty("hidden_quads"), 42);
        assert_eq!(technique_difficulty("no_such_technique"), 50);
    }

    #[test]
    fn test_category_bands() {
        assert_eq!(difficulty_to_category(0), Category::Error);
        assert_eq!(difficulty_to_category(8), Category::Trivial);
        assert_eq!(difficulty_to_category(25), Category::Basic);
        assert_eq!(difficulty_to_category(26), Category::Intermediate);
        assert_eq!(difficulty_to_category(68), Category::Tough);
        assert_eq!(difficulty_to_category(84), Category::Diabolical);
        assert_eq!(difficulty_to_category(99), Category::Grandmaster);
        assert_eq!(difficulty_to_category(100), Category::Grandmaster);
    }

    #[test]
    fn test_technique_category_agreement() {
        // Every technique's band matches the canonical table's category column.
        use Category::*;
        let expected = [
            (Technique::IncorrectValue, Error),
            (Technique::MissingCandidate, Error),
            (Technique::NakedSingle, Trivial),
            (Technique::LastRemainingInBox, Trivial),
            (Technique::LastRemainingInRow, Trivial),
            (Technique::LastRemainingInColumn, Trivial),
            (Technique::HiddenSingle, Trivial),
            (Technique::NakedPair, Basic),
            (Technique::PointingPair, Basic),
            (Technique::BoxLineReduction, Basic),
            (Technique::HiddenPair, Basic),
            (Technique::NakedTriple, Basic),
            (Technique::HiddenTriple, Intermediate),
            (Technique::NakedQuad, Intermediate),
            (Technique::HiddenQuad, Intermediate),
            (Technique::XWing, Tough),
            (Technique::YWing, Tough),
            (Technique::ChuteRemotePairs, Tough),
            (Technique::SimpleColoring, Tough),
            (Technique::Swordfish, Tough),
        ];
        for (technique, category) in expected {
            assert_eq!(technique.category(), category, "{technique}");
        }
    }

    #[test]
    fn test_battery_order_is_ascending() {
        for pair in Technique::ALL.windows(2) {
            assert!(pair[0].difficulty() <= pair[1].difficulty());
            assert!(pair[0] < pair[1]);
        }
    }

    #[test]
    fn test_name_roundtrip() {
        for technique in Technique::ALL {
            assert_eq!(Technique::from_name(technique.name()), Some(technique));
        }
        assert_eq!(Technique::from_name("swordfish"), Some(Technique::Swordfish));
        assert_eq!(Technique::from_name("jellyfish"), None);
    }
}
