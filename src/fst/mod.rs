//! Weighted finite-state transducers over Unicode scalar labels
//!
//! Labels are `char` code points; label 0 is reserved for epsilon, so U+0000
//! cannot be represented as a symbol. Weights live in the tropical semiring.
pub mod compose;
pub mod shortest_path;
pub mod weight;

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::fmt;

pub use compose::compose;
pub use shortest_path::shortest_path;
pub use weight::TropicalWeight;

pub type Label = u32;
pub type StateId = usize;

pub const EPSILON: Label = 0;

pub fn label_of(ch: char) -> Label {
    ch as Label
}

pub fn char_of(label: Label) -> Option<char> {
    if label == EPSILON {
        return None;
    }
    char::from_u32(label)
}

#[derive(Debug, Clone, PartialEq)]
pub enum FstError {
    MissingStart,
    StateOutOfRange { state: StateId, num_states: usize },
    InvalidWeight { state: StateId, weight: f32 },
    InvalidLabel(Label),
    StateLimitExceeded { limit: usize },
}

impl fmt::Display for FstError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FstError::MissingStart => write!(f, "non-empty transducer has no start state"),
            FstError::StateOutOfRange { state, num_states } => write!(
                f,
                "state {} out of range (transducer has {} states)",
                state, num_states
            ),
            FstError::InvalidWeight { state, weight } => {
                write!(f, "invalid weight {} at state {}", weight, state)
            }
            FstError::InvalidLabel(label) => {
                write!(f, "label {} is not a Unicode scalar value", label)
            }
            FstError::StateLimitExceeded { limit } => {
                write!(f, "composition exceeded the limit of {} states", limit)
            }
        }
    }
}

impl std::error::Error for FstError {}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transition {
    pub ilabel: Label,
    pub olabel: Label,
    pub weight: TropicalWeight,
    pub nextstate: StateId,
}

impl Transition {
    pub fn new(ilabel: Label, olabel: Label, weight: TropicalWeight, nextstate: StateId) -> Self {
        Self {
            ilabel,
            olabel,
            weight,
            nextstate,
        }
    }

    pub fn epsilon(weight: TropicalWeight, nextstate: StateId) -> Self {
        Self::new(EPSILON, EPSILON, weight, nextstate)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct State {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub final_weight: Option<TropicalWeight>,
    #[serde(default)]
    pub transitions: Vec<Transition>,
}

/// A mutable weighted transducer. Transition order within a state is
/// significant: it decides ties during shortest-path search.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Fst {
    #[serde(default)]
    start: Option<StateId>,
    #[serde(default)]
    states: Vec<State>,
}

impl Fst {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_state(&mut self) -> StateId {
        self.states.push(State::default());
        self.states.len() - 1
    }

    pub fn set_start(&mut self, state: StateId) {
        self.start = Some(state);
    }

    pub fn start(&self) -> Option<StateId> {
        self.start
    }

    pub fn set_final(&mut self, state: StateId, weight: TropicalWeight) {
        self.states[state].final_weight = Some(weight);
    }

    pub fn final_weight(&self, state: StateId) -> Option<TropicalWeight> {
        self.states.get(state).and_then(|s| s.final_weight)
    }

    pub fn add_transition(&mut self, state: StateId, transition: Transition) {
        self.states[state].transitions.push(transition);
    }

    pub fn transitions(&self, state: StateId) -> &[Transition] {
        self.states
            .get(state)
            .map(|s| s.transitions.as_slice())
            .unwrap_or(&[])
    }

    pub fn num_states(&self) -> usize {
        self.states.len()
    }

    pub fn num_transitions(&self) -> usize {
        self.states.iter().map(|s| s.transitions.len()).sum()
    }

    /// True when the machine accepts nothing by construction (no start state).
    pub fn is_empty(&self) -> bool {
        self.start.is_none() || self.states.is_empty()
    }

    /// Single-path acceptor for exactly `text`, one transition per character.
    pub fn acceptor(text: &str) -> Self {
        let mut fst = Fst::new();
        let mut current = fst.add_state();
        fst.set_start(current);

        for ch in text.chars() {
            let next = fst.add_state();
            let label = label_of(ch);
            fst.add_transition(
                current,
                Transition::new(label, label, TropicalWeight::one(), next),
            );
            current = next;
        }

        fst.set_final(current, TropicalWeight::one());
        fst
    }

    /// Transducer mapping exactly `input` to exactly `output` with the given cost.
    ///
    /// Characters are paired position by position; the shorter side is padded
    /// with epsilons. The weight sits on the first transition.
    pub fn cross(input: &str, output: &str, weight: TropicalWeight) -> Self {
        let inputs: Vec<Label> = input.chars().map(label_of).collect();
        let outputs: Vec<Label> = output.chars().map(label_of).collect();
        let len = inputs.len().max(outputs.len());

        let mut fst = Fst::new();
        let mut current = fst.add_state();
        fst.set_start(current);

        if len == 0 {
            fst.set_final(current, weight);
            return fst;
        }

        for i in 0..len {
            let next = fst.add_state();
            let ilabel = inputs.get(i).copied().unwrap_or(EPSILON);
            let olabel = outputs.get(i).copied().unwrap_or(EPSILON);
            let arc_weight = if i == 0 { weight } else { TropicalWeight::one() };
            fst.add_transition(current, Transition::new(ilabel, olabel, arc_weight, next));
            current = next;
        }

        fst.set_final(current, TropicalWeight::one());
        fst
    }

    /// Union of unweighted string pairs sharing a single start state.
    pub fn string_map<I, A, B>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (A, B)>,
        A: AsRef<str>,
        B: AsRef<str>,
    {
        let mut fst = Fst::new();
        let start = fst.add_state();
        fst.set_start(start);

        for (input, output) in pairs {
            let branch = Fst::cross(input.as_ref(), output.as_ref(), TropicalWeight::one());
            let offset = fst.append_states(&branch);
            if let Some(branch_start) = branch.start {
                fst.add_transition(
                    start,
                    Transition::epsilon(TropicalWeight::one(), branch_start + offset),
                );
            }
        }

        fst
    }

    /// Machine accepting the paths of either operand.
    pub fn union(&self, other: &Fst) -> Fst {
        if self.is_empty() {
            return other.clone();
        }
        if other.is_empty() {
            return self.clone();
        }

        let mut fst = Fst::new();
        let start = fst.add_state();
        fst.set_start(start);

        for operand in [self, other] {
            let offset = fst.append_states(operand);
            if let Some(operand_start) = operand.start {
                fst.add_transition(
                    start,
                    Transition::epsilon(TropicalWeight::one(), operand_start + offset),
                );
            }
        }

        fst
    }

    /// Machine accepting a path of `self` followed by a path of `other`.
    pub fn concat(&self, other: &Fst) -> Fst {
        let (Some(_), Some(other_start)) = (self.start, other.start) else {
            return Fst::new();
        };

        let mut fst = self.clone();
        let own_states = fst.states.len();
        let offset = fst.append_states(other);

        for state in 0..own_states {
            if let Some(weight) = fst.states[state].final_weight.take() {
                fst.add_transition(state, Transition::epsilon(weight, other_start + offset));
            }
        }

        fst
    }

    /// Kleene star: zero or more repetitions of `self`.
    pub fn closure(&self) -> Fst {
        let mut fst = Fst::new();
        let start = fst.add_state();
        fst.set_start(start);
        fst.set_final(start, TropicalWeight::one());

        let Some(inner_start) = self.start else {
            return fst;
        };

        let offset = fst.append_states(self);
        fst.add_transition(
            start,
            Transition::epsilon(TropicalWeight::one(), inner_start + offset),
        );

        for state in offset..fst.states.len() {
            if let Some(weight) = fst.states[state].final_weight {
                fst.add_transition(state, Transition::epsilon(weight, inner_start + offset));
            }
        }

        fst
    }

    /// Remove states that are not both reachable from the start and able to
    /// reach a final state. Surviving states keep their relative order.
    pub fn connect(&self) -> Fst {
        let Some(start) = self.start else {
            return Fst::new();
        };
        let n = self.states.len();

        let mut accessible = vec![false; n];
        let mut queue = VecDeque::from([start]);
        accessible[start] = true;
        while let Some(state) = queue.pop_front() {
            for t in &self.states[state].transitions {
                if !accessible[t.nextstate] {
                    accessible[t.nextstate] = true;
                    queue.push_back(t.nextstate);
                }
            }
        }

        let mut reverse: Vec<Vec<StateId>> = vec![Vec::new(); n];
        for (state, s) in self.states.iter().enumerate() {
            for t in &s.transitions {
                reverse[t.nextstate].push(state);
            }
        }

        let mut coaccessible = vec![false; n];
        for (state, s) in self.states.iter().enumerate() {
            if s.final_weight.is_some() {
                coaccessible[state] = true;
                queue.push_back(state);
            }
        }
        while let Some(state) = queue.pop_front() {
            for &prev in &reverse[state] {
                if !coaccessible[prev] {
                    coaccessible[prev] = true;
                    queue.push_back(prev);
                }
            }
        }

        if !(accessible[start] && coaccessible[start]) {
            return Fst::new();
        }

        let mut remap: Vec<Option<StateId>> = vec![None; n];
        let mut fst = Fst::new();
        for state in 0..n {
            if accessible[state] && coaccessible[state] {
                remap[state] = Some(fst.add_state());
            }
        }

        for (state, s) in self.states.iter().enumerate() {
            let Some(new_state) = remap[state] else {
                continue;
            };
            fst.states[new_state].final_weight = s.final_weight;
            for t in &s.transitions {
                if let Some(next) = remap[t.nextstate] {
                    fst.add_transition(new_state, Transition { nextstate: next, ..*t });
                }
            }
        }

        fst.start = remap[start];
        fst
    }

    /// Check structural invariants required by composition and search.
    pub fn validate(&self) -> Result<(), FstError> {
        let num_states = self.states.len();

        match self.start {
            None if num_states > 0 => return Err(FstError::MissingStart),
            Some(state) if state >= num_states => {
                return Err(FstError::StateOutOfRange { state, num_states })
            }
            _ => {}
        }

        for (state, s) in self.states.iter().enumerate() {
            if let Some(weight) = s.final_weight {
                if !weight.is_valid() {
                    return Err(FstError::InvalidWeight {
                        state,
                        weight: weight.value(),
                    });
                }
            }

            for t in &s.transitions {
                if t.nextstate >= num_states {
                    return Err(FstError::StateOutOfRange {
                        state: t.nextstate,
                        num_states,
                    });
                }
                if !t.weight.is_valid() {
                    return Err(FstError::InvalidWeight {
                        state,
                        weight: t.weight.value(),
                    });
                }
                for label in [t.ilabel, t.olabel] {
                    if label != EPSILON && char::from_u32(label).is_none() {
                        return Err(FstError::InvalidLabel(label));
                    }
                }
            }
        }

        Ok(())
    }

    /// Decode the output side of a single-path machine, skipping epsilons.
    ///
    /// Returns `None` for an empty machine, a branching or cyclic machine, a
    /// path that does not end in a final state, or an undecodable label.
    pub fn output_string(&self) -> Option<String> {
        let mut state = self.start?;
        let mut output = String::new();
        let mut steps = 0;

        loop {
            match self.transitions(state) {
                [] => break,
                [t] => {
                    if t.olabel != EPSILON {
                        output.push(char_of(t.olabel)?);
                    }
                    state = t.nextstate;
                }
                _ => return None,
            }

            steps += 1;
            if steps > self.states.len() {
                return None;
            }
        }

        self.final_weight(state)?;
        Some(output)
    }

    /// Copy `other`'s states after our own, returning the offset applied to
    /// its state ids. The start state of `other` is not adopted.
    fn append_states(&mut self, other: &Fst) -> StateId {
        let offset = self.states.len();
        self.states.extend(other.states.iter().map(|s| State {
            final_weight: s.final_weight,
            transitions: s
                .transitions
                .iter()
                .map(|t| Transition {
                    nextstate: t.nextstate + offset,
                    ..*t
                })
                .collect(),
        }));
        offset
    }
}
