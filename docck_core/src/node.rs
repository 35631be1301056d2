/// One element of a parsed document.
///
/// Text is stored the element-tree way: `text` is everything between the
/// opening tag and the first child, and each child's `tail` is the text
/// between that child's end and the next sibling (or the parent's close).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Node {
	/// Lower-cased tag name. Empty for the synthetic document node.
	pub tag: String,
	/// Attributes in source order. Attributes written without a value hold
	/// an empty string.
	pub attributes: Vec<(String, String)>,
	/// Text before the first child.
	pub text: String,
	/// Child elements in document order.
	pub children: Vec<Node>,
	/// Text following this element inside its parent.
	pub tail: String,
}

impl Node {
	pub fn new(tag: impl Into<String>, attributes: Vec<(String, String)>) -> Self {
		Self {
			tag: tag.into(),
			attributes,
			..Self::default()
		}
	}

	/// The synthetic node holding the top-level elements of a document.
	pub fn document() -> Self {
		Self::default()
	}

	pub fn is_document(&self) -> bool {
		self.tag.is_empty()
	}

	/// Value of the attribute `name`, if present.
	pub fn attribute(&self, name: &str) -> Option<&str> {
		self.attributes
			.iter()
			.find(|(key, _)| key == name)
			.map(|(_, value)| value.as_str())
	}

	pub fn has_attribute(&self, name: &str) -> bool {
		self.attribute(name).is_some()
	}

	/// Direct children with the given tag.
	pub fn children_named<'a>(&'a self, tag: &'a str) -> impl Iterator<Item = &'a Node> + 'a {
		self.children.iter().filter(move |child| child.tag == tag)
	}

	/// The full text content of this element with all markup removed.
	pub fn flatten(&self) -> String {
		let mut acc = String::new();
		self.flatten_into(&mut acc);
		acc
	}

	fn flatten_into(&self, acc: &mut String) {
		acc.push_str(&self.text);

		for child in &self.children {
			child.flatten_into(acc);
			acc.push_str(&child.tail);
		}
	}

	/// The outermost element of a document node, or `self` for any other
	/// node.
	pub fn root_element(&self) -> Option<&Node> {
		if self.is_document() {
			self.children.first()
		} else {
			Some(self)
		}
	}
}
