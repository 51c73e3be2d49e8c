//! The built-in catalog of 25 technical books (ids 1-25).

use crate::error::Result;
use crate::types::{BookRecord, Catalog};

#[rustfmt::skip]
const SAMPLE_BOOKS: [(&str, &str, &str, &str, f32, i64); 25] = [
    ("Hands-On Machine Learning with Scikit-Learn, Keras, and TensorFlow", "Aurélien Géron", "Machine Learning", "Intermediate", 4.6, 2022),
    ("Deep Learning", "Ian Goodfellow, Yoshua Bengio, Aaron Courville", "Deep Learning", "Advanced", 4.5, 2016),
    ("Python Machine Learning", "Sebastian Raschka", "Machine Learning", "Intermediate", 4.4, 2019),
    ("Reinforcement Learning: An Introduction", "Richard S. Sutton, Andrew G. Barto", "Reinforcement Learning", "Advanced", 4.7, 2018),
    ("Pattern Recognition and Machine Learning", "Christopher M. Bishop", "Machine Learning", "Advanced", 4.6, 2006),
    ("Deep Learning with Python", "François Chollet", "Deep Learning", "Beginner", 4.5, 2021),
    ("The Hundred-Page Machine Learning Book", "Andriy Burkov", "Machine Learning", "Beginner", 4.3, 2019),
    ("Python for Data Analysis", "Wes McKinney", "Data Science", "Beginner", 4.4, 2022),
    ("Introduction to Statistical Learning", "Gareth James, Daniela Witten", "Machine Learning", "Intermediate", 4.6, 2021),
    ("Natural Language Processing with Python", "Steven Bird, Ewan Klein", "NLP", "Intermediate", 4.2, 2009),
    ("Computer Vision: Algorithms and Applications", "Richard Szeliski", "Computer Vision", "Advanced", 4.5, 2022),
    ("Designing Machine Learning Systems", "Chip Huyen", "MLOps", "Intermediate", 4.7, 2022),
    ("Grokking Deep Learning", "Andrew Trask", "Deep Learning", "Beginner", 4.4, 2019),
    ("Data Science from Scratch", "Joel Grus", "Data Science", "Beginner", 4.3, 2019),
    ("Algorithms", "Robert Sedgewick, Kevin Wayne", "Algorithms", "Intermediate", 4.5, 2011),
    ("Deep Reinforcement Learning Hands-On", "Maxim Lapan", "Reinforcement Learning", "Intermediate", 4.4, 2020),
    ("Fluent Python", "Luciano Ramalho", "Python", "Intermediate", 4.7, 2022),
    ("Speech and Language Processing", "Dan Jurafsky, James H. Martin", "NLP", "Advanced", 4.6, 2023),
    ("Machine Learning Engineering", "Andriy Burkov", "MLOps", "Intermediate", 4.5, 2020),
    ("Probabilistic Machine Learning: An Introduction", "Kevin Murphy", "Machine Learning", "Advanced", 4.6, 2022),
    ("Deep Learning for Computer Vision", "Rajalingappaa Shanmugamani", "Computer Vision", "Intermediate", 4.3, 2018),
    ("Python Data Science Handbook", "Jake VanderPlas", "Data Science", "Intermediate", 4.5, 2016),
    ("Introduction to Algorithms", "Thomas H. Cormen", "Algorithms", "Advanced", 4.5, 2009),
    ("Effective Python", "Brett Slatkin", "Python", "Intermediate", 4.5, 2019),
    ("Neural Networks and Deep Learning", "Michael Nielsen", "Deep Learning", "Beginner", 4.7, 2015),
];

/// Raw records for the sample catalog, numbered 1..=25 in order.
pub fn sample_records() -> Vec<BookRecord> {
    SAMPLE_BOOKS
        .iter()
        .enumerate()
        .map(|(i, &(title, author, category, level, rating, year))| BookRecord {
            id: Some(i as i64 + 1),
            title: Some(title.to_string()),
            author: Some(author.to_string()),
            category: Some(category.to_string()),
            level: Some(level.to_string()),
            rating: Some(rating),
            year: Some(year),
        })
        .collect()
}

/// Load the sample catalog
pub fn sample_catalog() -> Result<Catalog> {
    Catalog::load(sample_records())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_catalog_loads() {
        let catalog = sample_catalog().unwrap();
        assert_eq!(catalog.len(), 25);
        assert_eq!(catalog.get(1).unwrap().author, "Aurélien Géron");
        assert_eq!(catalog.get(25).unwrap().title, "Neural Networks and Deep Learning");
        assert!(catalog.all().iter().all(|b| (0.0..=5.0).contains(&b.rating)));
    }
}
