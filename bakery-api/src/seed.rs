//! Fixed sample catalogue inserted by `POST /api/seed`.

use crate::schemas::BakeryItem;

fn sample(name: &str, description: &str, price: f64, category: &str, image_url: &str) -> BakeryItem {
    BakeryItem {
        name: name.to_string(),
        description: Some(description.to_string()),
        price,
        category: category.to_string(),
        image_url: Some(image_url.to_string()),
        is_available: true,
    }
}

pub fn sample_items() -> Vec<BakeryItem> {
    vec![
        sample(
            "Butter Croissant",
            "Flaky, buttery layers baked fresh every morning",
            3.5,
            "Pastry",
            "https://images.unsplash.com/photo-1541781774459-bb2af2f05b55",
        ),
        sample(
            "Sourdough Loaf",
            "Slow-fermented with a crisp crust and tender crumb",
            6.0,
            "Bread",
            "https://images.unsplash.com/photo-1608198093002-ad4e005484ec",
        ),
        sample(
            "Chocolate Chip Cookie",
            "Chewy center with dark chocolate chunks",
            2.0,
            "Cookie",
            "https://images.unsplash.com/photo-1541976076758-347942db1970",
        ),
        sample(
            "Red Velvet Cupcake",
            "With cream cheese frosting",
            3.0,
            "Cake",
            "https://images.unsplash.com/photo-1599785209796-9e77cab9f1d5",
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schemas::validate;

    #[test]
    fn samples_are_valid_and_available() {
        let items = sample_items();

        assert_eq!(items.len(), 4);
        assert!(items.iter().all(|item| item.is_available));
        assert!(items.iter().all(|item| validate(item).is_ok()));
    }
}
