// src/noyau/pile.rs
//
// Pile LIFO minimale (empiler / depiler / sommet).
// depiler() et sommet() renvoient None sur pile vide : c’est à l’appelant
// de transformer ce signal en erreur.

#[derive(Clone, Debug, PartialEq)]
pub struct Pile<T> {
    items: Vec<T>,
}

impl<T> Default for Pile<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<T> Pile<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn empiler(&mut self, item: T) {
        self.items.push(item);
    }

    pub fn depiler(&mut self) -> Option<T> {
        self.items.pop()
    }

    /// Lecture du sommet sans retrait.
    pub fn sommet(&self) -> Option<&T> {
        self.items.last()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn est_vide(&self) -> bool {
        self.items.is_empty()
    }

    /// Du fond vers le sommet (ordre d’empilement).
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.items.iter()
    }
}
