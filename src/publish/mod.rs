//! Publishing to a Cookidoo account as a private created recipe

mod client;
mod payload;

pub use client::{CookidooClient, UploadResult};
pub use payload::{
    Annotation, AnnotationPosition, Description, IngredientData, RecipeMetadata, RecipePayload,
    StepItem, Temperature, TextItem, TtsData, Yield,
};
