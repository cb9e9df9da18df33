// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Connections graph of a learning sequence
//!
//! Nodes are input bits and areas; an edge exists for every source -> target
//! pair that fires in some step, labelled with the step indices.

use std::fmt::{self, Write as _};

use serde::Serialize;

use crate::input::InputStimuli;
use crate::sequence::SequenceStep;

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum GraphNode {
    InputBit(usize),
    Area(String),
}

impl fmt::Display for GraphNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GraphNode::InputBit(bit) => write!(f, "Input Bit #{}", bit),
            GraphNode::Area(name) => write!(f, "{}", name),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GraphEdge {
    pub source: GraphNode,
    pub target: GraphNode,
    /// Replay steps in which this edge fires
    pub steps: Vec<usize>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ConnectionsGraph {
    nodes: Vec<GraphNode>,
    edges: Vec<GraphEdge>,
}

impl ConnectionsGraph {
    pub fn from_steps<'a>(
        steps: impl Iterator<Item = SequenceStep<'a>>,
        input_stimuli: &InputStimuli,
    ) -> Self {
        let mut graph = Self::default();
        for step in steps {
            for &bit in step.definition.input_bits() {
                if let Some(input) = input_stimuli.bit(bit) {
                    graph.connect(
                        GraphNode::InputBit(bit),
                        GraphNode::Area(input.area().to_string()),
                        step.index,
                    );
                }
            }
            for (source, targets) in step.definition.areas_to_areas() {
                for target in targets {
                    graph.connect(
                        GraphNode::Area(source.clone()),
                        GraphNode::Area(target.clone()),
                        step.index,
                    );
                }
            }
        }
        graph
    }

    fn connect(&mut self, source: GraphNode, target: GraphNode, step: usize) {
        for node in [&source, &target] {
            if !self.nodes.contains(node) {
                self.nodes.push(node.clone());
            }
        }
        match self
            .edges
            .iter_mut()
            .find(|e| e.source == source && e.target == target)
        {
            Some(edge) => edge.steps.push(step),
            None => self.edges.push(GraphEdge {
                source,
                target,
                steps: vec![step],
            }),
        }
    }

    /// Nodes in order of first appearance
    pub fn nodes(&self) -> &[GraphNode] {
        &self.nodes
    }

    pub fn edges(&self) -> &[GraphEdge] {
        &self.edges
    }

    pub fn edge(&self, source: &GraphNode, target: &GraphNode) -> Option<&GraphEdge> {
        self.edges
            .iter()
            .find(|e| &e.source == source && &e.target == target)
    }

    /// Graphviz DOT rendering
    pub fn to_dot(&self) -> String {
        let mut dot = String::from("digraph learning_sequence {\n");
        for node in &self.nodes {
            let shape = match node {
                GraphNode::InputBit(_) => "box",
                GraphNode::Area(_) => "ellipse",
            };
            let _ = writeln!(dot, "    \"{}\" [shape={}];", node, shape);
        }
        for edge in &self.edges {
            let steps = edge
                .steps
                .iter()
                .map(|s| s.to_string())
                .collect::<Vec<_>>()
                .join(",");
            let _ = writeln!(
                dot,
                "    \"{}\" -> \"{}\" [label=\"{}\"];",
                edge.source, edge.target, steps
            );
        }
        dot.push('}');
        dot.push('\n');
        dot
    }
}
