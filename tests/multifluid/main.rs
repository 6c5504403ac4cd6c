mod derivatives;
mod parameters;
