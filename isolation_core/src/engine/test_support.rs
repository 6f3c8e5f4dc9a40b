use crate::engine::{Evaluator, GameState, Player};
use crate::logic::board::Cell;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::rc::Rc;

#[derive(Debug, Clone, Default)]
pub struct Node {
    pub children: Vec<usize>,
    /// Static value from the first player's point of view. Doubles as the
    /// terminal payoff when the node has no children.
    pub value: f64,
    pub own_liberties: usize,
    pub opp_liberties: usize,
}

/// Game over an explicit tree. Actions are child node indices.
#[derive(Debug, Clone)]
pub struct ScriptedState {
    tree: Rc<Vec<Node>>,
    node: usize,
    ply: u32,
}

impl ScriptedState {
    pub fn value(&self) -> f64 {
        self.current().value
    }

    #[must_use]
    pub fn at_ply(mut self, ply: u32) -> Self {
        self.ply = ply;
        self
    }

    fn current(&self) -> &Node {
        &self.tree[self.node]
    }
}

impl GameState for ScriptedState {
    type Action = usize;

    fn actions(&self) -> Vec<usize> {
        self.current().children.clone()
    }

    fn result(&self, action: usize) -> Self {
        Self {
            tree: Rc::clone(&self.tree),
            node: action,
            ply: self.ply + 1,
        }
    }

    fn terminal_test(&self) -> bool {
        self.current().children.is_empty()
    }

    fn utility(&self, player: Player) -> f64 {
        match player {
            Player::First => self.value(),
            Player::Second => -self.value(),
        }
    }

    // Token "cells" just select which liberty count `liberties` reports.
    fn loc(&self, player: Player) -> Option<Cell> {
        u8::try_from(player.index()).ok().map(Cell::from_index)
    }

    fn liberties(&self, loc: Option<Cell>) -> Vec<Cell> {
        let node = self.current();
        let count = match loc.map(Cell::index) {
            Some(0) => node.own_liberties,
            Some(1) => node.opp_liberties,
            _ => 0,
        };
        vec![Cell::from_index(0); count]
    }

    fn ply_count(&self) -> u32 {
        self.ply
    }
}

pub struct TreeBuilder {
    nodes: Vec<Node>,
}

impl TreeBuilder {
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::default()],
        }
    }

    pub const fn root() -> usize {
        0
    }

    pub fn add(&mut self, parent: usize, value: f64) -> usize {
        self.add_node(
            parent,
            Node {
                value,
                ..Node::default()
            },
        )
    }

    /// Non-terminal node whose liberty counts drive the mobility heuristic.
    pub fn add_mobile(&mut self, parent: usize, own: usize, opp: usize) -> usize {
        let id = self.add_node(
            parent,
            Node {
                own_liberties: own,
                opp_liberties: opp,
                ..Node::default()
            },
        );
        self.add(id, 0.0);
        id
    }

    /// Adds `values.len()` terminal children under a fresh child of `parent`.
    pub fn add_with_leaves(&mut self, parent: usize, values: &[f64]) -> usize {
        let id = self.add(parent, 0.0);
        for &v in values {
            self.add(id, v);
        }
        id
    }

    pub fn build(self) -> ScriptedState {
        ScriptedState {
            tree: Rc::new(self.nodes),
            node: Self::root(),
            ply: 1,
        }
    }

    fn add_node(&mut self, parent: usize, node: Node) -> usize {
        let id = self.nodes.len();
        self.nodes.push(node);
        self.nodes[parent].children.push(id);
        id
    }
}

/// Random tree with small integer values so that ties are common.
pub fn random_tree(seed: u64, depth: u8, max_branching: usize) -> ScriptedState {
    fn grow(builder: &mut TreeBuilder, rng: &mut StdRng, parent: usize, depth: u8, max: usize) {
        if depth == 0 {
            return;
        }
        let branching = rng.gen_range(1..=max);
        for _ in 0..branching {
            let value = f64::from(rng.gen_range(-9i32..=9));
            let child = builder.add(parent, value);
            // Occasionally stop early to mix terminal and frontier leaves.
            if rng.gen_bool(0.8) {
                grow(builder, rng, child, depth - 1, max);
            }
        }
    }

    let mut rng = StdRng::seed_from_u64(seed);
    let mut builder = TreeBuilder::new();
    grow(&mut builder, &mut rng, TreeBuilder::root(), depth, max_branching);
    builder.build()
}

/// Reads the scripted value and counts how often it was asked.
#[derive(Debug, Default)]
pub struct StaticValue {
    pub calls: std::cell::Cell<usize>,
}

impl Evaluator<ScriptedState> for StaticValue {
    fn evaluate(&self, state: &ScriptedState) -> f64 {
        self.calls.set(self.calls.get() + 1);
        state.value()
    }
}
