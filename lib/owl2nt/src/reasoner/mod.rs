//! Classification of the named classes of an ontology.
//!
//! Exporters only see the [`Reasoner`] trait so that any classification
//! service can be plugged in. [`StructuralReasoner`] is the built-in one:
//! it computes the hierarchy entailed by told subsumptions.

mod node;

pub use node::ClassNode;

use crate::axiom::Axiom;
use crate::entity::OwlClass;
use crate::expression::ClassExpression;
use crate::ontology::Ontology;
use rustc_hash::{FxHashMap, FxHashSet};
use std::collections::VecDeque;
use std::fmt;
use std::time::Instant;
use tracing::debug;

/// A classified class hierarchy.
pub trait Reasoner {
    /// Returns the nodes that are direct subclasses of `class`.
    ///
    /// Equivalent classes share a single node. The bottom node is returned
    /// for classes without any other subclass. Classes the reasoner does not
    /// know have no subclass.
    fn direct_sub_classes(&self, class: &OwlClass) -> Vec<&ClassNode>;
}

impl<R: Reasoner + ?Sized> Reasoner for &R {
    fn direct_sub_classes(&self, class: &OwlClass) -> Vec<&ClassNode> {
        (**self).direct_sub_classes(class)
    }
}

/// Classifies an ontology from its told subsumptions.
///
/// The entailed hierarchy is the reflexive and transitive closure of:
/// - `SubClassOf(A B)` for named classes `A` and `B`,
/// - `SubClassOf(A ObjectIntersectionOf(B ...))`, making `A` a subclass of each named conjunct,
/// - `EquivalentClasses(...)`, read as subsumptions in both directions,
/// - every class being a subclass of owl:Thing.
///
/// Classes with owl:Nothing as superclass are unsatisfiable and merged into the bottom node.
///
/// Classification happens once, in [`StructuralReasoner::classify`]: the
/// returned value is an immutable hierarchy that may be queried many times.
#[derive(Debug)]
pub struct StructuralReasoner {
    nodes: Vec<ClassNode>,
    node_of: FxHashMap<OwlClass, usize>,
    direct_sub_nodes: Vec<Vec<usize>>,
    bottom: usize,
}

impl StructuralReasoner {
    /// Classifies all classes of the import closure of `ontology`.
    pub fn classify(ontology: &Ontology) -> Self {
        let start = Instant::now();
        let mut builder = HierarchyBuilder::default();
        builder.class(&OwlClass::thing());
        builder.class(&OwlClass::nothing());
        for class in ontology.closure_classes() {
            builder.class(class);
        }
        for axiom in ontology.closure_axioms() {
            builder.axiom(axiom);
        }
        let reasoner = builder.build();
        debug!(
            "Classified {} classes into {} nodes in {:.3}s",
            reasoner.node_of.len(),
            reasoner.nodes.len(),
            start.elapsed().as_secs_f64()
        );
        reasoner
    }

    /// The node a class belongs to.
    pub fn node(&self, class: &OwlClass) -> Option<&ClassNode> {
        self.node_of.get(class).map(|i| &self.nodes[*i])
    }

    /// The node of owl:Nothing and of the unsatisfiable classes.
    pub fn bottom_node(&self) -> &ClassNode {
        &self.nodes[self.bottom]
    }

    /// Classes equivalent to owl:Nothing, owl:Nothing itself excluded.
    pub fn unsatisfiable_classes(&self) -> impl Iterator<Item = &OwlClass> {
        self.bottom_node()
            .classes()
            .iter()
            .filter(|c| !c.is_owl_nothing())
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }
}

impl Reasoner for StructuralReasoner {
    fn direct_sub_classes(&self, class: &OwlClass) -> Vec<&ClassNode> {
        let Some(node) = self.node_of.get(class) else {
            return Vec::new();
        };
        self.direct_sub_nodes[*node]
            .iter()
            .map(|i| &self.nodes[*i])
            .collect()
    }
}

impl fmt::Display for StructuralReasoner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "StructuralReasoner(classes={}, nodes={}, unsatisfiable={})",
            self.node_of.len(),
            self.nodes.len(),
            self.bottom_node().classes().len() - 1
        )
    }
}

/// Told subsumption graph over class indices.
#[derive(Default)]
struct HierarchyBuilder {
    classes: Vec<OwlClass>,
    index: FxHashMap<OwlClass, usize>,
    told_supers: Vec<FxHashSet<usize>>,
}

impl HierarchyBuilder {
    fn class(&mut self, class: &OwlClass) -> usize {
        if let Some(i) = self.index.get(class) {
            return *i;
        }
        let i = self.classes.len();
        self.classes.push(class.clone());
        self.index.insert(class.clone(), i);
        self.told_supers.push(FxHashSet::default());
        i
    }

    fn subsumption(&mut self, sub: &OwlClass, sup: &ClassExpression) {
        let sub = self.class(sub);
        for sup in sup.named_subsumers() {
            let sup = self.class(sup);
            if sub != sup {
                self.told_supers[sub].insert(sup);
            }
        }
    }

    fn axiom(&mut self, axiom: &Axiom) {
        match axiom {
            Axiom::SubClassOf {
                sub_class,
                super_class,
            } => {
                if let Some(sub) = sub_class.as_class() {
                    self.subsumption(sub, super_class);
                }
            }
            Axiom::EquivalentClasses(expressions) => {
                for (i, expression) in expressions.iter().enumerate() {
                    let Some(class) = expression.as_class() else {
                        continue;
                    };
                    for (j, other) in expressions.iter().enumerate() {
                        if i != j {
                            self.subsumption(class, other);
                        }
                    }
                }
            }
        }
    }

    /// Reflexive and transitive closure of the told superclasses of `start`.
    fn super_classes(&self, start: usize) -> FxHashSet<usize> {
        let mut reached = FxHashSet::default();
        reached.insert(start);
        let mut queue = VecDeque::from([start]);
        while let Some(current) = queue.pop_front() {
            for sup in &self.told_supers[current] {
                if reached.insert(*sup) {
                    queue.push_back(*sup);
                }
            }
        }
        reached
    }

    fn build(self) -> StructuralReasoner {
        let thing = self.index[&OwlClass::thing()];
        let nothing = self.index[&OwlClass::nothing()];
        let supers: Vec<FxHashSet<usize>> = (0..self.classes.len())
            .map(|i| {
                let mut supers = self.super_classes(i);
                supers.insert(thing);
                supers
            })
            .collect();

        // Equivalence classes, the unsatisfiable classes being all equivalent to owl:Nothing
        let mut node_of_class = vec![usize::MAX; self.classes.len()];
        let mut members: Vec<Vec<usize>> = Vec::new();
        let bottom_members: Vec<usize> = (0..self.classes.len())
            .filter(|i| supers[*i].contains(&nothing))
            .collect();
        for i in &bottom_members {
            node_of_class[*i] = 0;
        }
        members.push(bottom_members);
        for i in 0..self.classes.len() {
            if node_of_class[i] != usize::MAX {
                continue;
            }
            let node = members.len();
            let mut equivalents: Vec<usize> = supers[i]
                .iter()
                .copied()
                .filter(|j| supers[*j].contains(&i))
                .collect();
            equivalents.sort_unstable();
            for j in &equivalents {
                node_of_class[*j] = node;
            }
            members.push(equivalents);
        }

        // Strict super nodes of each satisfiable node
        let super_nodes: Vec<FxHashSet<usize>> = members
            .iter()
            .enumerate()
            .map(|(node, classes)| {
                if node == 0 {
                    return FxHashSet::default();
                }
                supers[classes[0]]
                    .iter()
                    .map(|c| node_of_class[*c])
                    .filter(|n| *n != node)
                    .collect()
            })
            .collect();

        let mut direct_sub_nodes = vec![Vec::new(); members.len()];
        for (node, node_supers) in super_nodes.iter().enumerate() {
            for sup in node_supers {
                let is_direct = !node_supers
                    .iter()
                    .any(|other| other != sup && super_nodes[*other].contains(sup));
                if is_direct {
                    direct_sub_nodes[*sup].push(node);
                }
            }
        }
        // The bottom node is below every leaf
        for subs in direct_sub_nodes.iter_mut().skip(1) {
            if subs.is_empty() {
                subs.push(0);
            }
        }

        let nodes: Vec<ClassNode> = members
            .into_iter()
            .map(|classes| {
                let mut classes = classes.into_iter().map(|c| self.classes[c].clone());
                let first = classes.next().unwrap_or_else(OwlClass::nothing);
                ClassNode::new(first, classes)
            })
            .collect();
        for subs in &mut direct_sub_nodes {
            subs.sort_by(|a, b| nodes[*a].representative().cmp(nodes[*b].representative()));
        }

        let node_of = self
            .classes
            .into_iter()
            .zip(node_of_class)
            .collect::<FxHashMap<_, _>>();
        StructuralReasoner {
            nodes,
            node_of,
            direct_sub_nodes,
            bottom: 0,
        }
    }
}
