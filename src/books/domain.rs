use crate::core::domain::Identifiable;

pub mod model;

pub trait Book: Identifiable {
    fn title(&self) -> &str;
    fn author(&self) -> &str;
    fn year(&self) -> i64;

    // Author filters ignore case, e.g. "tolkien" matches "Tolkien".
    fn is_written_by(&self, author: &str) -> bool {
        self.author().to_lowercase() == author.to_lowercase()
    }

    fn is_published_in(&self, year: i64) -> bool {
        self.year() == year
    }
}
