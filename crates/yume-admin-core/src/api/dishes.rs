use tracing::info;

use crate::models::{Dish, DishForm, OneOrMany};

use super::{ApiError, RequestDescriptor, SessionClient};

const DISHES_PATH: &str = "dishes";

fn dish_path(id: i64) -> String {
    format!("{}/{}", DISHES_PATH, id)
}

impl SessionClient {
    pub async fn fetch_dishes(&self) -> Result<Vec<Dish>, ApiError> {
        let dishes: OneOrMany<Dish> = self
            .send(&RequestDescriptor::get(DISHES_PATH))
            .await
            .into_json()?;
        Ok(dishes.into_vec())
    }

    /// Add a dish to the menu. The form must include an image.
    pub async fn create_dish(&self, form: &DishForm) -> Result<(), ApiError> {
        form.validate(true).map_err(ApiError::Validation)?;
        let request = RequestDescriptor::post(DISHES_PATH).multipart(form.to_multipart());
        self.send(&request).await.into_empty()?;
        info!(name = %form.name.trim(), "Dish created");
        Ok(())
    }

    /// Replace a dish's fields. Without an image the current one is kept.
    pub async fn update_dish(&self, id: i64, form: &DishForm) -> Result<(), ApiError> {
        form.validate(false).map_err(ApiError::Validation)?;
        let request = RequestDescriptor::put(dish_path(id)).multipart(form.to_multipart());
        self.send(&request).await.into_empty()?;
        info!(dish = id, "Dish updated");
        Ok(())
    }

    pub async fn delete_dish(&self, id: i64) -> Result<(), ApiError> {
        self.send(&RequestDescriptor::delete(dish_path(id)))
            .await
            .into_empty()?;
        info!(dish = id, "Dish deleted");
        Ok(())
    }
}
