use crate::domain::{Category, Price};

#[derive(Debug, Clone)]
pub struct BookCreate {
    pub title: String,
    pub author: String,
    pub description: String,
    pub category: Category,
    pub image: String,
    pub price: Price,
    pub quantity: u32,
    pub threshold: u32,
}

#[derive(Debug, Clone, Default)]
pub struct BookPatch {
    pub description: Option<String>,
    pub image: Option<String>,
    pub price: Option<Price>,
    pub quantity: Option<u32>,
    pub threshold: Option<u32>,
}
