use runa_utilities::VecSet;

use crate::AutomatonError;
use crate::Symbol;
use crate::SymbolDict;

/// An alphabet translates symbol names to symbol indices and, when it is
/// finite, enumerates its symbols.
///
/// # Details
///
/// All variants share the same capability set: [translate](Alphabet::translate),
/// [symbols](Alphabet::symbols) and [complement](Alphabet::complement).
/// Variants that cannot enumerate their symbols report an unsupported
/// operation error instead.
pub enum Alphabet<'a> {
    /// Interns names on first use, backed by a caller-owned dictionary.
    OnTheFly(OnTheFlyAlphabet<'a>),

    /// A finite alphabet fixed at construction; unknown names are rejected.
    Enumerated(EnumAlphabet),

    /// The 256 byte values, with a literal notation for single characters.
    Char(CharAlphabet),

    /// Names are symbol numbers; cannot be enumerated.
    Direct(DirectAlphabet),
}

impl Alphabet<'_> {
    /// Translates a symbol name into a symbol index.
    pub fn translate(&mut self, name: &str) -> Result<Symbol, AutomatonError> {
        match self {
            Alphabet::OnTheFly(alphabet) => Ok(alphabet.translate(name)),
            Alphabet::Enumerated(alphabet) => alphabet.translate(name),
            Alphabet::Char(alphabet) => alphabet.translate(name),
            Alphabet::Direct(alphabet) => alphabet.translate(name),
        }
    }

    /// Returns the symbols of the alphabet in ascending order.
    pub fn symbols(&self) -> Result<Vec<Symbol>, AutomatonError> {
        match self {
            Alphabet::OnTheFly(alphabet) => Ok(alphabet.symbols()),
            Alphabet::Enumerated(alphabet) => Ok(alphabet.symbols()),
            Alphabet::Char(alphabet) => Ok(alphabet.symbols()),
            Alphabet::Direct(_) => Err(AutomatonError::UnsupportedOperation {
                alphabet: "direct",
                operation: "symbol enumeration",
            }),
        }
    }

    /// Returns the symbols of the alphabet that are not in the given set, in
    /// ascending order.
    pub fn complement(&self, symbols: &VecSet<Symbol>) -> Result<Vec<Symbol>, AutomatonError> {
        match self {
            Alphabet::Direct(_) => Err(AutomatonError::UnsupportedOperation {
                alphabet: "direct",
                operation: "complement",
            }),
            _ => Ok(self
                .symbols()?
                .into_iter()
                .filter(|symb| !symbols.contains(symb))
                .collect()),
        }
    }
}

/// An alphabet that assigns the next free symbol index to every name it has
/// not seen before. The name dictionary is owned by the caller and can be
/// consulted, or reused for another automaton, afterwards.
pub struct OnTheFlyAlphabet<'a> {
    symbol_map: &'a mut SymbolDict,
    next_symbol: usize,
}

impl<'a> OnTheFlyAlphabet<'a> {
    /// Creates an alphabet backed by the given dictionary. Fresh names are
    /// assigned indices above the largest index already present.
    pub fn new(symbol_map: &'a mut SymbolDict) -> Self {
        let next_symbol = symbol_map.values().map(|symb| symb.value() + 1).max().unwrap_or(0);

        Self {
            symbol_map,
            next_symbol,
        }
    }

    fn translate(&mut self, name: &str) -> Symbol {
        if let Some(&symb) = self.symbol_map.get(name) {
            return symb;
        }

        let symb = Symbol::new(self.next_symbol);
        self.next_symbol += 1;
        self.symbol_map.insert(name.to_string(), symb);
        symb
    }

    fn symbols(&self) -> Vec<Symbol> {
        let mut symbols: Vec<Symbol> = self.symbol_map.values().copied().collect();
        symbols.sort();
        symbols
    }
}

/// An alphabet built once from a finite list of symbol names.
pub struct EnumAlphabet {
    symbol_map: SymbolDict,
}

impl EnumAlphabet {
    /// Creates the alphabet from the given names, assigning indices in order
    /// of occurrence. A name that occurs more than once is an error.
    pub fn new<I, S>(names: I) -> Result<Self, AutomatonError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut symbol_map = SymbolDict::default();
        for (index, name) in names.into_iter().enumerate() {
            let name = name.as_ref();
            if symbol_map.insert(name.to_string(), Symbol::new(index)).is_some() {
                return Err(AutomatonError::DuplicateSymbol(name.to_string()));
            }
        }

        Ok(Self { symbol_map })
    }

    fn translate(&self, name: &str) -> Result<Symbol, AutomatonError> {
        self.symbol_map
            .get(name)
            .copied()
            .ok_or_else(|| AutomatonError::UnknownSymbol(name.to_string()))
    }

    fn symbols(&self) -> Vec<Symbol> {
        let mut symbols: Vec<Symbol> = self.symbol_map.values().copied().collect();
        symbols.sort();
        symbols
    }
}

/// The alphabet of the 256 byte values.
pub struct CharAlphabet;

impl CharAlphabet {
    fn translate(&self, name: &str) -> Result<Symbol, AutomatonError> {
        // The three character forms 'x' and "x" denote the byte value of x.
        let bytes = name.as_bytes();
        if bytes.len() == 3
            && ((bytes[0] == b'\'' && bytes[2] == b'\'') || (bytes[0] == b'"' && bytes[2] == b'"'))
        {
            return Ok(Symbol::new(bytes[1] as usize));
        }

        parse_symbol_number(name)
    }

    fn symbols(&self) -> Vec<Symbol> {
        (0..256).map(Symbol::new).collect()
    }
}

/// An alphabet whose symbol names are the symbol numbers themselves.
pub struct DirectAlphabet;

impl DirectAlphabet {
    fn translate(&self, name: &str) -> Result<Symbol, AutomatonError> {
        parse_symbol_number(name)
    }
}

fn parse_symbol_number(name: &str) -> Result<Symbol, AutomatonError> {
    name.trim()
        .parse::<usize>()
        .map(Symbol::new)
        .map_err(|_| AutomatonError::InvalidSymbolNumber(name.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_on_the_fly_interns_names() {
        let mut dict = SymbolDict::default();
        let mut alphabet = Alphabet::OnTheFly(OnTheFlyAlphabet::new(&mut dict));

        assert_eq!(alphabet.translate("a").unwrap(), Symbol::new(0));
        assert_eq!(alphabet.translate("b").unwrap(), Symbol::new(1));
        assert_eq!(alphabet.translate("a").unwrap(), Symbol::new(0));
        assert_eq!(alphabet.symbols().unwrap(), vec![Symbol::new(0), Symbol::new(1)]);

        assert_eq!(dict.len(), 2);
    }

    #[test]
    fn test_on_the_fly_resumes_above_existing_indices() {
        let mut dict = SymbolDict::default();
        dict.insert("a".to_string(), Symbol::new(3));

        let mut alphabet = Alphabet::OnTheFly(OnTheFlyAlphabet::new(&mut dict));
        assert_eq!(alphabet.translate("b").unwrap(), Symbol::new(4));
        assert_eq!(alphabet.translate("a").unwrap(), Symbol::new(3));
    }

    #[test]
    fn test_enumerated_rejects_unknown_names() {
        let mut alphabet = Alphabet::Enumerated(EnumAlphabet::new(["a", "b"]).unwrap());

        assert_eq!(alphabet.translate("b").unwrap(), Symbol::new(1));
        assert!(matches!(
            alphabet.translate("c"),
            Err(AutomatonError::UnknownSymbol(name)) if name == "c"
        ));
    }

    #[test]
    fn test_enumerated_rejects_duplicates() {
        assert!(matches!(
            EnumAlphabet::new(["a", "b", "a"]),
            Err(AutomatonError::DuplicateSymbol(name)) if name == "a"
        ));
    }

    #[test]
    fn test_char_alphabet_translations() {
        let mut alphabet = Alphabet::Char(CharAlphabet);

        assert_eq!(alphabet.translate("'x'").unwrap(), Symbol::new(b'x' as usize));
        assert_eq!(alphabet.translate("\"x\"").unwrap(), Symbol::new(b'x' as usize));
        assert_eq!(alphabet.translate("65").unwrap(), Symbol::new(65));
        assert!(alphabet.translate("xyz").is_err());

        assert_eq!(alphabet.symbols().unwrap().len(), 256);
    }

    #[test]
    fn test_direct_alphabet_cannot_enumerate() {
        let mut alphabet = Alphabet::Direct(DirectAlphabet);

        assert_eq!(alphabet.translate("17").unwrap(), Symbol::new(17));
        assert!(alphabet.translate("seventeen").is_err());
        assert!(alphabet.symbols().is_err());
        assert!(alphabet.complement(&VecSet::new()).is_err());
    }

    #[test]
    fn test_complement_is_ascending_difference() {
        let alphabet = Alphabet::Enumerated(EnumAlphabet::new(["a", "b", "c", "d"]).unwrap());

        let used: VecSet<Symbol> = [Symbol::new(1), Symbol::new(3)].into_iter().collect();
        assert_eq!(
            alphabet.complement(&used).unwrap(),
            vec![Symbol::new(0), Symbol::new(2)]
        );
    }
}
