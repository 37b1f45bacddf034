use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Represents a field in the object.
    Field(String),

    /// Represents an index in an array.
    Index(usize),
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Segment::Field(key) => write!(f, "Object[\"{}\"]", key),
            Segment::Index(index) => write!(f, "Array[{}]", index),
        }
    }
}

/// Trail of segments from the document root down to the node being compared.
///
/// Every node borrows its parent, so a recursive frame extends the trail with
/// [`PathContext::push`] without touching the node its siblings were given.
/// The root carries no segment.
#[derive(Debug, Clone, Copy)]
pub struct PathContext<'a> {
    segment: Option<&'a Segment>,
    parent: Option<&'a PathContext<'a>>,
}

impl<'a> PathContext<'a> {
    pub fn root() -> Self {
        PathContext {
            segment: None,
            parent: None,
        }
    }

    pub fn push<'b>(&'b self, segment: &'b Segment) -> PathContext<'b>
    where
        'a: 'b,
    {
        PathContext {
            segment: Some(segment),
            parent: Some(self),
        }
    }

    pub fn segment(&self) -> Option<&'a Segment> {
        self.segment
    }

    pub fn parent(&self) -> Option<&'a PathContext<'a>> {
        self.parent
    }

    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    /// Number of ancestors between this node and the root; the root itself is -1.
    pub fn depth(&self) -> isize {
        let mut depth = -1;
        let mut node = self;
        while let Some(parent) = node.parent() {
            depth += 1;
            node = parent;
        }
        depth
    }

    /// Walks from this node up to the root, deepest first.
    pub fn ancestors(&self) -> Ancestors<'_> {
        Ancestors {
            current: Some(self),
        }
    }

    /// Segments from the root down to this node.
    pub fn segments(&self) -> Vec<&Segment> {
        let mut segments: Vec<_> = self.ancestors().filter_map(|node| node.segment()).collect();
        segments.reverse();
        segments
    }
}

pub struct Ancestors<'a> {
    current: Option<&'a PathContext<'a>>,
}

impl<'a> Iterator for Ancestors<'a> {
    type Item = &'a PathContext<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.current?;
        self.current = node.parent();
        Some(node)
    }
}

impl fmt::Display for PathContext<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("root")?;
        for segment in self.segments() {
            write!(f, " -> {}", segment)?;
        }
        Ok(())
    }
}
