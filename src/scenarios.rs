use crate::error::ParseError;
use crate::problem::Problem;
use once_cell::sync::Lazy;
use std::collections::HashMap;

/// A built-in board with its known optimum (`None` when no plan exists).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Scenario {
    pub name: &'static str,
    pub input: &'static str,
    pub expected_steps: Option<usize>,
}

impl Scenario {
    pub fn problem(&self) -> Result<Problem, ParseError> {
        Problem::parse(self.input)
    }
}

const SCENARIO_DATA: &[Scenario] = &[
    Scenario {
        name: "open",
        input: "3 3\n1\n0\n10\na..\n...\n..A\n",
        expected_steps: Some(4),
    },
    Scenario {
        name: "corridor",
        input: "1 4\n2\n0\n20\naBbA\n",
        expected_steps: None,
    },
    Scenario {
        name: "bypass",
        input: "2 4\n2\n0\n10\naBAb\n#..#\n",
        expected_steps: Some(4),
    },
    Scenario {
        name: "detour",
        input: "3 3\n1\n0\n10\na#A\n.#.\n...\n",
        expected_steps: Some(6),
    },
    Scenario {
        name: "tight",
        input: "3 3\n1\n0\n5\na#A\n.#.\n...\n",
        expected_steps: None,
    },
    Scenario {
        name: "apart",
        input: "3 3\n2\n100\n50\na.B\n...\nb.A\n",
        expected_steps: None,
    },
    Scenario {
        name: "cross",
        input: "2 3\n2\n1\n6\na.b\nB.A\n",
        expected_steps: Some(3),
    },
    Scenario {
        name: "trio",
        input: "3 4\n3\n1\n12\na.bC\n.#..\nc.AB\n",
        expected_steps: Some(5),
    },
];

pub fn all_scenarios() -> &'static [Scenario] {
    SCENARIO_DATA
}

// Build a name -> scenario map once for O(1) lookup.
static SCENARIO_MAP: Lazy<HashMap<&'static str, &'static Scenario>> = Lazy::new(|| {
    let mut m = HashMap::new();
    for s in SCENARIO_DATA.iter() {
        m.insert(s.name, s);
    }
    m
});

pub fn get_scenario(name: &str) -> Option<&'static Scenario> {
    SCENARIO_MAP.get(name).copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_scenarios_parse() {
        for s in all_scenarios() {
            assert!(s.problem().is_ok(), "{}", s.name);
        }
        assert_eq!(all_scenarios().len(), 8);
    }

    #[test]
    fn get_scenario_returns_expected() {
        let s = get_scenario("detour").expect("detour should exist");
        assert_eq!(s.expected_steps, Some(6));
        assert_eq!(s.problem().unwrap().robot_count, 1);
        assert!(get_scenario("unknown").is_none());
    }
}
