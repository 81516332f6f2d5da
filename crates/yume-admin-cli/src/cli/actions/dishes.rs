use std::path::PathBuf;

use anyhow::{bail, Result};
use yume_admin_core::models::{Dish, DishForm, ImageUpload};
use yume_admin_core::SessionClient;

use super::auth::prompt_line;
use crate::cli::globals::GlobalArgs;
use crate::cli::render;

/// Fields given on the command line; `None` keeps the current value on edit.
#[derive(Debug, Default)]
pub struct DishFields {
    pub name: Option<String>,
    pub price: Option<f64>,
    pub ingredients: Option<String>,
    pub image: Option<PathBuf>,
}

#[derive(Debug)]
pub enum DishesAction {
    List,
    Add(DishFields),
    Edit { id: i64, fields: DishFields },
    Delete { id: i64, confirmed: bool },
}

/// # Errors
/// Returns an error if an image cannot be read or the backend call fails.
pub async fn execute(action: DishesAction, globals: &GlobalArgs) -> Result<()> {
    let client = globals.client()?;
    match action {
        DishesAction::List => list(&client).await,
        DishesAction::Add(fields) => add(&client, fields).await,
        DishesAction::Edit { id, fields } => edit(&client, id, fields).await,
        DishesAction::Delete { id, confirmed } => delete(&client, id, confirmed).await,
    }
}

fn load_image(path: Option<PathBuf>) -> Result<Option<ImageUpload>> {
    path.map(|p| ImageUpload::from_path(&p)).transpose()
}

async fn list(client: &SessionClient) -> Result<()> {
    let dishes = client.fetch_dishes().await?;
    if dishes.is_empty() {
        println!("No dishes on the menu");
    }
    let root = client.config().server_root();
    for dish in &dishes {
        println!("{}", render::dish_line(dish, root));
    }
    Ok(())
}

async fn add(client: &SessionClient, fields: DishFields) -> Result<()> {
    let form = DishForm {
        name: fields.name.unwrap_or_default(),
        price: fields.price.unwrap_or_default(),
        ingredients: fields.ingredients.unwrap_or_default(),
        image: load_image(fields.image)?,
    };
    client.create_dish(&form).await?;
    println!("Added {}", form.name.trim());
    Ok(())
}

/// Merge `fields` over the dish as it currently is on the server.
fn merged_form(current: &Dish, fields: DishFields, image: Option<ImageUpload>) -> DishForm {
    DishForm {
        name: fields.name.unwrap_or_else(|| current.name.clone().unwrap_or_default()),
        price: fields.price.unwrap_or(current.price),
        ingredients: fields
            .ingredients
            .unwrap_or_else(|| current.ingredients.clone().unwrap_or_default()),
        image,
    }
}

async fn edit(client: &SessionClient, id: i64, fields: DishFields) -> Result<()> {
    let dishes = client.fetch_dishes().await?;
    let Some(current) = dishes.iter().find(|d| d.id == id) else {
        bail!("Dish #{} not found", id);
    };
    let image = load_image(fields.image.clone())?;
    let form = merged_form(current, fields, image);
    client.update_dish(id, &form).await?;
    println!("Updated dish #{}", id);
    Ok(())
}

async fn delete(client: &SessionClient, id: i64, confirmed: bool) -> Result<()> {
    if !confirmed {
        let answer = prompt_line(&format!("Delete dish #{}? [y/N]", id), None)?;
        if !matches!(answer.to_lowercase().as_str(), "y" | "yes") {
            println!("Cancelled");
            return Ok(());
        }
    }
    client.delete_dish(id).await?;
    println!("Deleted dish #{}", id);
    Ok(())
}
