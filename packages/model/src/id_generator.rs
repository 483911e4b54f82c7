use crate::element::Element;
use crate::menu::MenuItem;
use crc32fast::Hasher;

/// Generate the id seed for a page using CRC32
pub fn get_page_seed(page_id: &str) -> String {
    let mut buff = String::from(page_id);
    if !page_id.starts_with("page://") {
        buff = format!("page://{}", buff);
    }

    let mut hasher = Hasher::new();
    hasher.update(buff.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Sequential ID generator for elements and menu items within a page
#[derive(Debug, Clone)]
pub struct IdGenerator {
    seed: String, // Page seed (CRC32)
    count: u32,   // Sequential counter
}

impl IdGenerator {
    pub fn new(page_id: &str) -> Self {
        Self {
            seed: get_page_seed(page_id),
            count: 0,
        }
    }

    pub fn from_seed(seed: String) -> Self {
        Self { seed, count: 0 }
    }

    /// Create a generator that continues after every id already in `tree`.
    ///
    /// Ids minted by a previous session share the page seed, so the counter
    /// resumes past the highest suffix found. Foreign ids are ignored.
    pub fn resume(page_id: &str, tree: &[Element]) -> Self {
        let mut gen = Self::new(page_id);
        gen.advance_past(tree);
        gen
    }

    /// Move the counter past every id in `tree` minted with this seed
    pub fn advance_past(&mut self, tree: &[Element]) {
        let mut highest = self.count;
        for element in tree {
            self.scan_element(element, &mut highest);
        }
        self.count = highest;
    }

    fn scan_element(&self, element: &Element, highest: &mut u32) {
        self.observe(&element.id, highest);
        for item in &element.menu_items {
            self.scan_menu_item(item, highest);
        }
        for child in &element.children {
            self.scan_element(child, highest);
        }
    }

    fn scan_menu_item(&self, item: &MenuItem, highest: &mut u32) {
        self.observe(&item.id, highest);
        for child in &item.children {
            self.scan_menu_item(child, highest);
        }
    }

    fn observe(&self, id: &str, highest: &mut u32) {
        let counter = id
            .strip_prefix(self.seed.as_str())
            .and_then(|rest| rest.strip_prefix('-'))
            .and_then(|n| n.parse::<u32>().ok());
        if let Some(n) = counter {
            *highest = (*highest).max(n);
        }
    }

    /// Generate next sequential ID
    pub fn new_id(&mut self) -> String {
        self.count += 1;
        format!("{}-{}", self.seed, self.count)
    }

    /// Get page seed
    pub fn seed(&self) -> &str {
        &self.seed
    }
}
