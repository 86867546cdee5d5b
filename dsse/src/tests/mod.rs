mod fixtures;
mod payload;
