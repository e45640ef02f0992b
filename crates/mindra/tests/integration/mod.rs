mod authoring;
mod identity;
mod learning;
mod persistence;
