//! Read-only element catalog backing the picker and icon enrichment.

use std::collections::HashMap;

use log::{info, warn};
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::error::ExplorerError;

const EMBEDDED_ELEMENTS: &str = include_str!("../assets/elements.json");
const ICON_BASE: &str = "https://little-alchemy.fandom.com/wiki/Special:FilePath/";

/// Shown when neither the catalog nor the service know an element's icon.
pub const PLACEHOLDER_ICON: &str = "/placeholder.svg";

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Element {
	pub name: String,
	pub icon_ref: String,
	pub description: Option<String>,
}

impl Element {
	pub fn new(name: impl Into<String>, icon_ref: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			icon_ref: icon_ref.into(),
			description: None,
		}
	}

	pub fn with_description(mut self, description: impl Into<String>) -> Self {
		self.description = Some(description.into());
		self
	}

	fn matches(&self, needle: &str) -> bool {
		self.name.to_lowercase().contains(needle)
			|| self
				.description
				.as_deref()
				.is_some_and(|d| d.to_lowercase().contains(needle))
	}
}

/// Catalog entries are either a bare icon URL or an object carrying a description.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawEntry {
	Icon(String),
	Detailed {
		icon: String,
		#[serde(default)]
		description: Option<String>,
	},
}

#[derive(Clone, Debug, Default)]
pub struct ElementCatalog {
	elements: Vec<Element>,
	by_name: HashMap<String, usize>,
}

impl ElementCatalog {
	/// Load the embedded mapping. Never fails: an unreadable mapping yields the built-in set.
	pub fn load() -> Self {
		match Self::from_json(EMBEDDED_ELEMENTS) {
			Ok(catalog) if !catalog.is_empty() => {
				info!("Loaded {} catalog elements", catalog.len());
				catalog
			}
			Ok(_) => {
				warn!("Element mapping is empty, using built-in elements");
				Self::fallback()
			}
			Err(err) => {
				warn!("{err}; using built-in elements");
				Self::fallback()
			}
		}
	}

	/// Parse an ordered `name -> icon` object. Duplicate names keep their first entry.
	pub fn from_json(raw: &str) -> Result<Self, ExplorerError> {
		let map: Map<String, Value> =
			serde_json::from_str(raw).map_err(|e| ExplorerError::CatalogLoad(e.to_string()))?;
		let mut elements = Vec::with_capacity(map.len());
		for (name, value) in map {
			let entry: RawEntry = serde_json::from_value(value)
				.map_err(|e| ExplorerError::CatalogLoad(format!("{name}: {e}")))?;
			let element = match entry {
				RawEntry::Icon(icon) => Element::new(name, icon),
				RawEntry::Detailed { icon, description } => Element {
					name,
					icon_ref: icon,
					description,
				},
			};
			elements.push(element);
		}
		Ok(Self::from_elements(elements))
	}

	pub fn from_elements(elements: impl IntoIterator<Item = Element>) -> Self {
		let mut catalog = Self::default();
		for element in elements {
			if catalog.by_name.contains_key(&element.name) {
				continue;
			}
			catalog.by_name.insert(element.name.clone(), catalog.elements.len());
			catalog.elements.push(element);
		}
		catalog
	}

	/// Small built-in set used when the mapping cannot be loaded.
	pub fn fallback() -> Self {
		const BUILT_IN: &[(&str, &str)] = &[
			("Water", "The fluid of life"),
			("Fire", "The energy of transformation"),
			("Earth", "The foundation of creation"),
			("Air", "The breath of existence"),
			("Heat", "Derived"),
			("Ice", "Derived"),
			("Snow", "Derived"),
			("Coal", "Derived"),
			("Mud", "Derived"),
			("Stone", "Derived"),
			("Clay", "Derived"),
			("Brick", "Derived"),
			("Sand", "Derived"),
			("Glass", "Derived"),
			("Metal", "Derived"),
			("Steam", "Derived"),
		];
		Self::from_elements(BUILT_IN.iter().map(|(name, description)| {
			Element::new(*name, format!("{ICON_BASE}{name}_2.svg")).with_description(*description)
		}))
	}

	#[cfg(test)]
	pub fn elements(&self) -> &[Element] {
		&self.elements
	}

	pub fn len(&self) -> usize {
		self.elements.len()
	}

	pub fn is_empty(&self) -> bool {
		self.elements.is_empty()
	}

	pub fn get(&self, name: &str) -> Option<&Element> {
		self.by_name.get(name).map(|&i| &self.elements[i])
	}

	pub fn icon_for(&self, name: &str) -> Option<&str> {
		self.get(name).map(|e| e.icon_ref.as_str())
	}

	/// Case-insensitive substring match on name or description, in catalog order.
	pub fn filter(&self, term: &str) -> Vec<Element> {
		let needle = term.trim().to_lowercase();
		if needle.is_empty() {
			return self.elements.clone();
		}
		self.elements
			.iter()
			.filter(|e| e.matches(&needle))
			.cloned()
			.collect()
	}
}

/// Slice out a 1-based page. Pages outside `[1, page_count]` are empty.
pub fn page(items: &[Element], page_number: usize, page_size: usize) -> Vec<Element> {
	if page_number == 0 || page_size == 0 {
		return Vec::new();
	}
	items
		.iter()
		.skip((page_number - 1).saturating_mul(page_size))
		.take(page_size)
		.cloned()
		.collect()
}

pub fn page_count(len: usize, page_size: usize) -> usize {
	if page_size == 0 { 0 } else { len.div_ceil(page_size) }
}
