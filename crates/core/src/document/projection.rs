/// Attributes to return from a read, in request order.
///
/// Repeated names are kept once.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Projection {
    attributes: Vec<String>,
}

impl Projection {
    pub fn new<I, S>(attributes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut projection = Self::default();
        for attribute in attributes {
            let attribute = attribute.into();
            if !projection.attributes.contains(&attribute) {
                projection.attributes.push(attribute);
            }
        }
        projection
    }

    pub fn attributes(&self) -> &[String] {
        &self.attributes
    }

    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }
}

impl From<&str> for Projection {
    fn from(attribute: &str) -> Self {
        Self::new([attribute])
    }
}

impl From<String> for Projection {
    fn from(attribute: String) -> Self {
        Self::new([attribute])
    }
}

impl From<Vec<String>> for Projection {
    fn from(attributes: Vec<String>) -> Self {
        Self::new(attributes)
    }
}

impl From<Vec<&str>> for Projection {
    fn from(attributes: Vec<&str>) -> Self {
        Self::new(attributes)
    }
}

impl From<&[&str]> for Projection {
    fn from(attributes: &[&str]) -> Self {
        Self::new(attributes.iter().copied())
    }
}

impl<const N: usize> From<[&str; N]> for Projection {
    fn from(attributes: [&str; N]) -> Self {
        Self::new(attributes)
    }
}
