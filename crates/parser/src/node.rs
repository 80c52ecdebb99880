//! In-memory element trees
//!
//! [`ElementNode`] implements [`Element`] without the upstream feed, for
//! tests, replay tooling and adapters that first copy a vendor tree.
//!
//! ```ignore
//! let event = ElementNode::sequence("HeadlineEconomicEvent")
//!     .with(ElementNode::text("ID_BB_GLOBAL", "BBG002SBQ0F2"))
//!     .with(ElementNode::choice("VALUE", ElementNode::text("SINGLE", "-1.52")));
//! ```

use std::fmt;

use crate::element::{Datetime, Element};

/// Scalar payload of a leaf node
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Text(String),
    Int(i64),
    Float(f64),
    Datetime(Datetime),
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) => f.write_str(s),
            Self::Int(v) => write!(f, "{v}"),
            Self::Float(v) => write!(f, "{v}"),
            Self::Datetime(dt) => match (dt.date, dt.time) {
                (Some(d), Some(t)) => write!(f, "{}T{}", d, t),
                (Some(d), None) => write!(f, "{d}"),
                (None, Some(t)) => write!(f, "{t}"),
                (None, None) => Ok(()),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Body {
    Sequence(Vec<ElementNode>),
    Choice(Box<ElementNode>),
    Scalar(Scalar),
    Null,
}

/// One named node of an owned element tree
#[derive(Debug, Clone, PartialEq)]
pub struct ElementNode {
    name: String,
    body: Body,
}

impl ElementNode {
    /// Node with named children, added with [`ElementNode::with`]
    pub fn sequence(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            body: Body::Sequence(Vec::new()),
        }
    }

    /// Choice node with its selected variant
    pub fn choice(name: impl Into<String>, selected: ElementNode) -> Self {
        Self {
            name: name.into(),
            body: Body::Choice(Box::new(selected)),
        }
    }

    pub fn text(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self::scalar(name, Scalar::Text(value.into()))
    }

    pub fn int(name: impl Into<String>, value: i64) -> Self {
        Self::scalar(name, Scalar::Int(value))
    }

    pub fn float(name: impl Into<String>, value: f64) -> Self {
        Self::scalar(name, Scalar::Float(value))
    }

    pub fn datetime(name: impl Into<String>, value: Datetime) -> Self {
        Self::scalar(name, Scalar::Datetime(value))
    }

    /// Explicitly null leaf
    pub fn null(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            body: Body::Null,
        }
    }

    fn scalar(name: impl Into<String>, value: Scalar) -> Self {
        Self {
            name: name.into(),
            body: Body::Scalar(value),
        }
    }

    /// Append a child; turns a leaf into a sequence
    pub fn with(mut self, child: ElementNode) -> Self {
        match &mut self.body {
            Body::Sequence(children) => children.push(child),
            body => *body = Body::Sequence(vec![child]),
        }
        self
    }

    /// Children of a sequence node
    pub fn children(&self) -> &[ElementNode] {
        match &self.body {
            Body::Sequence(children) => children,
            _ => &[],
        }
    }

    fn scalar_value(&self) -> Option<&Scalar> {
        match &self.body {
            Body::Scalar(value) => Some(value),
            _ => None,
        }
    }
}

impl<'a> Element for &'a ElementNode {
    fn name(&self) -> &str {
        &self.name
    }

    fn has_field(&self, name: &str) -> bool {
        self.field(name).is_some()
    }

    fn field(&self, name: &str) -> Option<Self> {
        let node: &'a ElementNode = *self;
        match &node.body {
            Body::Sequence(children) => children.iter().find(|c| c.name == name),
            Body::Choice(selected) if selected.name == name => Some(selected.as_ref()),
            _ => None,
        }
    }

    fn is_choice(&self) -> bool {
        matches!(self.body, Body::Choice(_))
    }

    fn choice(&self) -> Option<Self> {
        let node: &'a ElementNode = *self;
        match &node.body {
            Body::Choice(selected) => Some(selected.as_ref()),
            _ => None,
        }
    }

    fn is_null(&self) -> bool {
        matches!(self.body, Body::Null)
    }

    fn value_as_string(&self) -> Option<String> {
        self.scalar_value().map(Scalar::to_string)
    }

    fn value_as_i64(&self) -> Option<i64> {
        match self.scalar_value()? {
            Scalar::Int(v) => Some(*v),
            Scalar::Text(s) => s.trim().parse().ok(),
            Scalar::Float(_) | Scalar::Datetime(_) => None,
        }
    }

    fn value_as_datetime(&self) -> Option<Datetime> {
        match self.scalar_value()? {
            Scalar::Datetime(dt) => Some(*dt),
            _ => None,
        }
    }
}
