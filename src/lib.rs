//! Calculatrice formules: noyau réutilisable
//!
//! Évalue une formule infixe (nombres signés, + - * / ^, parenthèses, `$variables`)
//! en f64 : découpage -> classification -> shunting-yard -> résolution récursive.
//!
//! ```
//! use calculatrice_formules::noyau::Evaluateur;
//!
//! let mut ev = Evaluateur::new();
//! ev.enregistrer_variable("a", 2.5);
//! assert_eq!(ev.evaluer("($a + 4) * 4"), Ok(26.0));
//! assert_eq!(ev.evaluer("2^3^2"), Ok(512.0));
//! ```

pub mod noyau;
