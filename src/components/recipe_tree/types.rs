/// A recipe node placed in graph space.
#[derive(Clone, Debug, PartialEq)]
pub struct TreeNode {
	pub name: String,
	pub icon_ref: String,
	pub step: Option<String>,
	pub depth: usize,
	pub x: f64,
	pub y: f64,
	/// Side length of the node's square, in graph units.
	pub size: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TreeEdge {
	pub source: usize,
	pub target: usize,
	/// Depth of the source node; drives colour and draw order.
	pub depth: usize,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Bounds {
	pub min_x: f64,
	pub min_y: f64,
	pub max_y: f64,
}

impl Bounds {
	pub fn center_y(&self) -> f64 {
		(self.min_y + self.max_y) / 2.0
	}

	#[cfg(test)]
	pub fn height(&self) -> f64 {
		self.max_y - self.min_y
	}
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct TreeLayout {
	/// Pre-order: the root is always index 0.
	pub nodes: Vec<TreeNode>,
	pub edges: Vec<TreeEdge>,
	pub max_depth: usize,
}

impl TreeLayout {
	pub fn is_empty(&self) -> bool {
		self.nodes.is_empty()
	}

	pub fn bounds(&self) -> Bounds {
		let mut nodes = self.nodes.iter();
		let Some(first) = nodes.next() else {
			return Bounds::default();
		};
		let half = first.size / 2.0;
		let init = Bounds {
			min_x: first.x - half,
			min_y: first.y - half,
			max_y: first.y + half,
		};
		nodes.fold(init, |b, n| {
			let half = n.size / 2.0;
			Bounds {
				min_x: b.min_x.min(n.x - half),
				min_y: b.min_y.min(n.y - half),
				max_y: b.max_y.max(n.y + half),
			}
		})
	}
}
