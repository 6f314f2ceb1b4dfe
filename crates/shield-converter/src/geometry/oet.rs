//! Operation expression trees over signed body references.
//!
//! Trees are kept normalised: complements only ever sit on leaves, so a
//! tree can be flattened into the engine's sum-of-products zone syntax.

use sim_setup::OperationKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sign {
    Plus,
    Minus,
}

impl Sign {
    pub fn opposite(self) -> Sign {
        match self {
            Sign::Plus => Sign::Minus,
            Sign::Minus => Sign::Plus,
        }
    }

    pub fn symbol(self) -> char {
        match self {
            Sign::Plus => '+',
            Sign::Minus => '-',
        }
    }
}

/// Leaf of a tree: an engine body id, normal or complemented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SignedBody {
    pub body: u32,
    pub sign: Sign,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Oet {
    Body(SignedBody),
    Union(Box<Oet>, Box<Oet>),
    Intersect(Box<Oet>, Box<Oet>),
}

impl Oet {
    pub fn body(body: u32) -> Self {
        Oet::Body(SignedBody {
            body,
            sign: Sign::Plus,
        })
    }

    pub fn union(left: Oet, right: Oet) -> Self {
        Oet::Union(Box::new(left), Box::new(right))
    }

    pub fn intersect(left: Oet, right: Oet) -> Self {
        Oet::Intersect(Box::new(left), Box::new(right))
    }

    /// `left ∖ right`, i.e. `left ∩ ¬right`.
    pub fn subtract(left: Oet, right: Oet) -> Self {
        Oet::intersect(left, right.complement())
    }

    /// Complement, pushed down to the leaves with De Morgan's laws.
    pub fn complement(self) -> Self {
        match self {
            Oet::Body(leaf) => Oet::Body(SignedBody {
                body: leaf.body,
                sign: leaf.sign.opposite(),
            }),
            Oet::Union(l, r) => Oet::intersect(l.complement(), r.complement()),
            Oet::Intersect(l, r) => Oet::union(l.complement(), r.complement()),
        }
    }

    /// Fold a zone's construction steps over its base body, left to right.
    pub fn from_construction(base: u32, steps: &[(OperationKind, u32)]) -> Self {
        steps
            .iter()
            .fold(Oet::body(base), |acc, &(kind, body)| match kind {
                OperationKind::Intersect => Oet::intersect(acc, Oet::body(body)),
                OperationKind::Union => Oet::union(acc, Oet::body(body)),
                OperationKind::Subtract => Oet::subtract(acc, Oet::body(body)),
            })
    }

    /// Left-nested union of all trees; `None` when there are none.
    pub fn union_all(trees: impl IntoIterator<Item = Oet>) -> Option<Self> {
        trees.into_iter().reduce(Oet::union)
    }

    /// Disjunctive normal form: a union of intersection terms.
    ///
    /// Intersections expand left terms outer, right terms inner; unions
    /// concatenate.
    pub fn terms(&self) -> Vec<Vec<SignedBody>> {
        match self {
            Oet::Body(leaf) => vec![vec![*leaf]],
            Oet::Union(l, r) => {
                let mut terms = l.terms();
                terms.extend(r.terms());
                terms
            }
            Oet::Intersect(l, r) => {
                let right = r.terms();
                let mut terms = Vec::new();
                for lt in l.terms() {
                    for rt in &right {
                        let mut term = lt.clone();
                        term.extend_from_slice(rt);
                        terms.push(term);
                    }
                }
                terms
            }
        }
    }
}
