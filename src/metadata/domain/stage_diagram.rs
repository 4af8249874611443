//! Record lifecycle stage diagrams.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, VecDeque};

/// Finite state machine over the stages of a status-bearing record type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageDiagram {
    /// Enum field whose value is the current stage.
    pub controlling_field: String,
    /// Stage every new record starts in.
    pub starting_stage: String,
    /// When set, any stage may move to any other stage.
    #[serde(default)]
    pub all_transitions_allowed: bool,
    /// Stages keyed by name.
    #[serde(default)]
    pub stages: BTreeMap<String, Stage>,
    /// States keyed by name.
    #[serde(default)]
    pub states: BTreeMap<String, StageState>,
}

/// One stage and its outgoing transitions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stage {
    /// Stages reachable in one step.
    #[serde(default)]
    pub transitions_to: Vec<String>,
    /// Key of the state this stage belongs to.
    pub state: String,
}

/// Coarse grouping of stages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageState {
    /// Display name.
    pub name: String,
    /// Whether records in this state are finished.
    #[serde(default)]
    pub is_end_state: bool,
}

impl StageDiagram {
    /// Returns the successors of `stage`, honouring `all_transitions_allowed`.
    pub fn successors<'a>(&'a self, stage: &'a str) -> Box<dyn Iterator<Item = &'a str> + 'a> {
        if self.all_transitions_allowed {
            return Box::new(
                self.stages
                    .keys()
                    .map(String::as_str)
                    .filter(move |candidate| *candidate != stage),
            );
        }
        Box::new(
            self.stages
                .get(stage)
                .into_iter()
                .flat_map(|entry| entry.transitions_to.iter().map(String::as_str)),
        )
    }

    /// Returns every declared stage reachable from the starting stage.
    ///
    /// An undeclared starting stage yields an empty set.
    #[must_use]
    pub fn reachable_stages(&self) -> BTreeSet<&str> {
        let mut seen = BTreeSet::new();
        let Some((start, _)) = self.stages.get_key_value(&self.starting_stage) else {
            return seen;
        };
        let mut queue = VecDeque::from([start.as_str()]);
        seen.insert(start.as_str());
        while let Some(stage) = queue.pop_front() {
            for next in self.successors(stage) {
                if let Some((declared, _)) = self.stages.get_key_value(next)
                    && seen.insert(declared.as_str())
                {
                    queue.push_back(declared.as_str());
                }
            }
        }
        seen
    }

    /// Returns whether `stage` belongs to an end state.
    #[must_use]
    pub fn is_end_stage(&self, stage: &str) -> bool {
        self.stages
            .get(stage)
            .and_then(|entry| self.states.get(&entry.state))
            .is_some_and(|state| state.is_end_state)
    }

    /// Returns whether some end-state stage is reachable from the start.
    #[must_use]
    pub fn has_reachable_end_state(&self) -> bool {
        self.reachable_stages()
            .into_iter()
            .any(|stage| self.is_end_stage(stage))
    }

    /// Returns whether the diagram permits a move from `from` to `to`.
    #[must_use]
    pub fn allows_transition(&self, from: &str, to: &str) -> bool {
        self.stages.contains_key(to) && self.successors(from).any(|next| next == to)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    fn stage(state: &str, transitions_to: &[&str]) -> Stage {
        Stage {
            transitions_to: transitions_to.iter().map(|s| (*s).to_owned()).collect(),
            state: state.to_owned(),
        }
    }

    #[fixture]
    fn lifecycle() -> StageDiagram {
        StageDiagram {
            controlling_field: "status".to_owned(),
            starting_stage: "Active".to_owned(),
            all_transitions_allowed: false,
            stages: BTreeMap::from([
                ("Active".to_owned(), stage("open", &["Completed"])),
                ("Completed".to_owned(), stage("closed", &["Active"])),
                ("Orphan".to_owned(), stage("open", &[])),
            ]),
            states: BTreeMap::from([
                (
                    "open".to_owned(),
                    StageState {
                        name: "Open".to_owned(),
                        is_end_state: false,
                    },
                ),
                (
                    "closed".to_owned(),
                    StageState {
                        name: "Closed".to_owned(),
                        is_end_state: true,
                    },
                ),
            ]),
        }
    }

    #[rstest]
    fn reachability_follows_transitions(lifecycle: StageDiagram) {
        let reachable = lifecycle.reachable_stages();
        assert_eq!(reachable, BTreeSet::from(["Active", "Completed"]));
        assert!(lifecycle.has_reachable_end_state());
    }

    #[rstest]
    fn all_transitions_allowed_reaches_every_stage(mut lifecycle: StageDiagram) {
        lifecycle.all_transitions_allowed = true;
        assert_eq!(lifecycle.reachable_stages().len(), 3);
        assert!(lifecycle.allows_transition("Orphan", "Completed"));
        assert!(!lifecycle.allows_transition("Orphan", "Orphan"));
    }

    #[rstest]
    #[case("Active", "Completed", true)]
    #[case("Completed", "Active", true)]
    #[case("Active", "Orphan", false)]
    #[case("Active", "Nowhere", false)]
    fn transitions_are_checked(
        lifecycle: StageDiagram,
        #[case] from: &str,
        #[case] to: &str,
        #[case] expected: bool,
    ) {
        assert_eq!(lifecycle.allows_transition(from, to), expected);
    }

    #[rstest]
    fn undeclared_start_reaches_nothing(mut lifecycle: StageDiagram) {
        lifecycle.starting_stage = "Missing".to_owned();
        assert!(lifecycle.reachable_stages().is_empty());
        assert!(!lifecycle.has_reachable_end_state());
    }
}
