use std::fmt;
use std::str::FromStr;

use crate::error::VisualizerError;

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum AlgorithmId {
    Bubble,
    Selection,
    Insertion,
    Merge,
    Quick,
}

/// Static facts shown next to the chart for the selected algorithm.
#[derive(Debug, PartialEq, Eq)]
pub struct AlgorithmDescriptor {
    pub name: &'static str,
    pub best: &'static str,
    pub average: &'static str,
    pub worst: &'static str,
    pub space: &'static str,
    pub description: &'static str,
}

const BUBBLE: AlgorithmDescriptor = AlgorithmDescriptor {
    name: "Bubble Sort",
    best: "O(n)",
    average: "O(n²)",
    worst: "O(n²)",
    space: "O(1)",
    description: "Repeatedly compares adjacent elements and swaps them if they are in wrong order",
};

const SELECTION: AlgorithmDescriptor = AlgorithmDescriptor {
    name: "Selection Sort",
    best: "O(n²)",
    average: "O(n²)",
    worst: "O(n²)",
    space: "O(1)",
    description: "Finds the minimum element and places it at the beginning",
};

const INSERTION: AlgorithmDescriptor = AlgorithmDescriptor {
    name: "Insertion Sort",
    best: "O(n)",
    average: "O(n²)",
    worst: "O(n²)",
    space: "O(1)",
    description: "Builds the final sorted array one item at a time",
};

const MERGE: AlgorithmDescriptor = AlgorithmDescriptor {
    name: "Merge Sort",
    best: "O(n log n)",
    average: "O(n log n)",
    worst: "O(n log n)",
    space: "O(n)",
    description: "Divides the array into halves, sorts them, and merges back",
};

const QUICK: AlgorithmDescriptor = AlgorithmDescriptor {
    name: "Quick Sort",
    best: "O(n log n)",
    average: "O(n log n)",
    worst: "O(n²)",
    space: "O(log n)",
    description: "Selects a pivot element and partitions the array around it",
};

impl AlgorithmId {
    pub const ALL: [AlgorithmId; 5] = [
        AlgorithmId::Bubble,
        AlgorithmId::Selection,
        AlgorithmId::Insertion,
        AlgorithmId::Merge,
        AlgorithmId::Quick,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            AlgorithmId::Bubble => "bubble",
            AlgorithmId::Selection => "selection",
            AlgorithmId::Insertion => "insertion",
            AlgorithmId::Merge => "merge",
            AlgorithmId::Quick => "quick",
        }
    }

    pub fn descriptor(&self) -> &'static AlgorithmDescriptor {
        match self {
            AlgorithmId::Bubble => &BUBBLE,
            AlgorithmId::Selection => &SELECTION,
            AlgorithmId::Insertion => &INSERTION,
            AlgorithmId::Merge => &MERGE,
            AlgorithmId::Quick => &QUICK,
        }
    }

    /// Position on the keyboard row, `1` for bubble through `5` for quick.
    pub fn from_digit(digit: char) -> Option<Self> {
        let index = digit.to_digit(10)?.checked_sub(1)? as usize;
        Self::ALL.get(index).copied()
    }
}

impl FromStr for AlgorithmId {
    type Err = VisualizerError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let wanted = input.trim().to_lowercase();
        Self::ALL
            .iter()
            .copied()
            .find(|algo| {
                algo.id() == wanted
                    || algo.descriptor().name.to_lowercase() == wanted
                    || algo.id().to_string() + "sort" == wanted.replace([' ', '-', '_'], "")
            })
            .ok_or_else(|| VisualizerError::UnknownAlgorithm(input.to_string()))
    }
}

impl fmt::Display for AlgorithmId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.descriptor().name)
    }
}
