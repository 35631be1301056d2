//! Named character references understood by the markup parser.
//!
//! The table holds the 252 HTML 4 names plus `larrb` / `rarrb`, which the
//! documentation generator emits even though they only exist in HTML 5.

/// Tags that never carry children or a matching close tag.
pub const VOID_ELEMENTS: [&str; 16] = [
	"area", "base", "br", "col", "embed", "hr", "img", "input", "keygen", "link", "menuitem",
	"meta", "param", "source", "track", "wbr",
];

/// Returns true if `tag` is a void element.
pub fn is_void_element(tag: &str) -> bool {
	VOID_ELEMENTS.contains(&tag)
}

/// Resolve a named character reference (without the surrounding `&` and
/// `;`) to the character it stands for.
pub fn lookup_entity(name: &str) -> Option<char> {
	let ch = match name {
		// HTML 5 arrows used by the generator.
		"larrb" => '\u{21e4}',
		"rarrb" => '\u{21e5}',
		"Aacute" => '\u{00c1}',
		"aacute" => '\u{00e1}',
		"Acirc" => '\u{00c2}',
		"acirc" => '\u{00e2}',
		"acute" => '\u{00b4}',
		"AElig" => '\u{00c6}',
		"aelig" => '\u{00e6}',
		"Agrave" => '\u{00c0}',
		"agrave" => '\u{00e0}',
		"alefsym" => '\u{2135}',
		"Alpha" => '\u{0391}',
		"alpha" => '\u{03b1}',
		"amp" => '\u{0026}',
		"and" => '\u{2227}',
		"ang" => '\u{2220}',
		"Aring" => '\u{00c5}',
		"aring" => '\u{00e5}',
		"asymp" => '\u{2248}',
		"Atilde" => '\u{00c3}',
		"atilde" => '\u{00e3}',
		"Auml" => '\u{00c4}',
		"auml" => '\u{00e4}',
		"bdquo" => '\u{201e}',
		"Beta" => '\u{0392}',
		"beta" => '\u{03b2}',
		"brvbar" => '\u{00a6}',
		"bull" => '\u{2022}',
		"cap" => '\u{2229}',
		"Ccedil" => '\u{00c7}',
		"ccedil" => '\u{00e7}',
		"cedil" => '\u{00b8}',
		"cent" => '\u{00a2}',
		"Chi" => '\u{03a7}',
		"chi" => '\u{03c7}',
		"circ" => '\u{02c6}',
		"clubs" => '\u{2663}',
		"cong" => '\u{2245}',
		"copy" => '\u{00a9}',
		"crarr" => '\u{21b5}',
		"cup" => '\u{222a}',
		"curren" => '\u{00a4}',
		"Dagger" => '\u{2021}',
		"dagger" => '\u{2020}',
		"dArr" => '\u{21d3}',
		"darr" => '\u{2193}',
		"deg" => '\u{00b0}',
		"Delta" => '\u{0394}',
		"delta" => '\u{03b4}',
		"diams" => '\u{2666}',
		"divide" => '\u{00f7}',
		"Eacute" => '\u{00c9}',
		"eacute" => '\u{00e9}',
		"Ecirc" => '\u{00ca}',
		"ecirc" => '\u{00ea}',
		"Egrave" => '\u{00c8}',
		"egrave" => '\u{00e8}',
		"empty" => '\u{2205}',
		"emsp" => '\u{2003}',
		"ensp" => '\u{2002}',
		"Epsilon" => '\u{0395}',
		"epsilon" => '\u{03b5}',
		"equiv" => '\u{2261}',
		"Eta" => '\u{0397}',
		"eta" => '\u{03b7}',
		"ETH" => '\u{00d0}',
		"eth" => '\u{00f0}',
		"Euml" => '\u{00cb}',
		"euml" => '\u{00eb}',
		"euro" => '\u{20ac}',
		"exist" => '\u{2203}',
		"fnof" => '\u{0192}',
		"forall" => '\u{2200}',
		"frac12" => '\u{00bd}',
		"frac14" => '\u{00bc}',
		"frac34" => '\u{00be}',
		"frasl" => '\u{2044}',
		"Gamma" => '\u{0393}',
		"gamma" => '\u{03b3}',
		"ge" => '\u{2265}',
		"gt" => '\u{003e}',
		"hArr" => '\u{21d4}',
		"harr" => '\u{2194}',
		"hearts" => '\u{2665}',
		"hellip" => '\u{2026}',
		"Iacute" => '\u{00cd}',
		"iacute" => '\u{00ed}',
		"Icirc" => '\u{00ce}',
		"icirc" => '\u{00ee}',
		"iexcl" => '\u{00a1}',
		"Igrave" => '\u{00cc}',
		"igrave" => '\u{00ec}',
		"image" => '\u{2111}',
		"infin" => '\u{221e}',
		"int" => '\u{222b}',
		"Iota" => '\u{0399}',
		"iota" => '\u{03b9}',
		"iquest" => '\u{00bf}',
		"isin" => '\u{2208}',
		"Iuml" => '\u{00cf}',
		"iuml" => '\u{00ef}',
		"Kappa" => '\u{039a}',
		"kappa" => '\u{03ba}',
		"Lambda" => '\u{039b}',
		"lambda" => '\u{03bb}',
		"lang" => '\u{2329}',
		"laquo" => '\u{00ab}',
		"lArr" => '\u{21d0}',
		"larr" => '\u{2190}',
		"lceil" => '\u{2308}',
		"ldquo" => '\u{201c}',
		"le" => '\u{2264}',
		"lfloor" => '\u{230a}',
		"lowast" => '\u{2217}',
		"loz" => '\u{25ca}',
		"lrm" => '\u{200e}',
		"lsaquo" => '\u{2039}',
		"lsquo" => '\u{2018}',
		"lt" => '\u{003c}',
		"macr" => '\u{00af}',
		"mdash" => '\u{2014}',
		"micro" => '\u{00b5}',
		"middot" => '\u{00b7}',
		"minus" => '\u{2212}',
		"Mu" => '\u{039c}',
		"mu" => '\u{03bc}',
		"nabla" => '\u{2207}',
		"nbsp" => '\u{00a0}',
		"ndash" => '\u{2013}',
		"ne" => '\u{2260}',
		"ni" => '\u{220b}',
		"not" => '\u{00ac}',
		"notin" => '\u{2209}',
		"nsub" => '\u{2284}',
		"Ntilde" => '\u{00d1}',
		"ntilde" => '\u{00f1}',
		"Nu" => '\u{039d}',
		"nu" => '\u{03bd}',
		"Oacute" => '\u{00d3}',
		"oacute" => '\u{00f3}',
		"Ocirc" => '\u{00d4}',
		"ocirc" => '\u{00f4}',
		"OElig" => '\u{0152}',
		"oelig" => '\u{0153}',
		"Ograve" => '\u{00d2}',
		"ograve" => '\u{00f2}',
		"oline" => '\u{203e}',
		"Omega" => '\u{03a9}',
		"omega" => '\u{03c9}',
		"Omicron" => '\u{039f}',
		"omicron" => '\u{03bf}',
		"oplus" => '\u{2295}',
		"or" => '\u{2228}',
		"ordf" => '\u{00aa}',
		"ordm" => '\u{00ba}',
		"Oslash" => '\u{00d8}',
		"oslash" => '\u{00f8}',
		"Otilde" => '\u{00d5}',
		"otilde" => '\u{00f5}',
		"otimes" => '\u{2297}',
		"Ouml" => '\u{00d6}',
		"ouml" => '\u{00f6}',
		"para" => '\u{00b6}',
		"part" => '\u{2202}',
		"permil" => '\u{2030}',
		"perp" => '\u{22a5}',
		"Phi" => '\u{03a6}',
		"phi" => '\u{03c6}',
		"Pi" => '\u{03a0}',
		"pi" => '\u{03c0}',
		"piv" => '\u{03d6}',
		"plusmn" => '\u{00b1}',
		"pound" => '\u{00a3}',
		"Prime" => '\u{2033}',
		"prime" => '\u{2032}',
		"prod" => '\u{220f}',
		"prop" => '\u{221d}',
		"Psi" => '\u{03a8}',
		"psi" => '\u{03c8}',
		"quot" => '\u{0022}',
		"radic" => '\u{221a}',
		"rang" => '\u{232a}',
		"raquo" => '\u{00bb}',
		"rArr" => '\u{21d2}',
		"rarr" => '\u{2192}',
		"rceil" => '\u{2309}',
		"rdquo" => '\u{201d}',
		"real" => '\u{211c}',
		"reg" => '\u{00ae}',
		"rfloor" => '\u{230b}',
		"Rho" => '\u{03a1}',
		"rho" => '\u{03c1}',
		"rlm" => '\u{200f}',
		"rsaquo" => '\u{203a}',
		"rsquo" => '\u{2019}',
		"sbquo" => '\u{201a}',
		"Scaron" => '\u{0160}',
		"scaron" => '\u{0161}',
		"sdot" => '\u{22c5}',
		"sect" => '\u{00a7}',
		"shy" => '\u{00ad}',
		"Sigma" => '\u{03a3}',
		"sigma" => '\u{03c3}',
		"sigmaf" => '\u{03c2}',
		"sim" => '\u{223c}',
		"spades" => '\u{2660}',
		"sub" => '\u{2282}',
		"sube" => '\u{2286}',
		"sum" => '\u{2211}',
		"sup" => '\u{2283}',
		"sup1" => '\u{00b9}',
		"sup2" => '\u{00b2}',
		"sup3" => '\u{00b3}',
		"supe" => '\u{2287}',
		"szlig" => '\u{00df}',
		"Tau" => '\u{03a4}',
		"tau" => '\u{03c4}',
		"there4" => '\u{2234}',
		"Theta" => '\u{0398}',
		"theta" => '\u{03b8}',
		"thetasym" => '\u{03d1}',
		"thinsp" => '\u{2009}',
		"THORN" => '\u{00de}',
		"thorn" => '\u{00fe}',
		"tilde" => '\u{02dc}',
		"times" => '\u{00d7}',
		"trade" => '\u{2122}',
		"Uacute" => '\u{00da}',
		"uacute" => '\u{00fa}',
		"uArr" => '\u{21d1}',
		"uarr" => '\u{2191}',
		"Ucirc" => '\u{00db}',
		"ucirc" => '\u{00fb}',
		"Ugrave" => '\u{00d9}',
		"ugrave" => '\u{00f9}',
		"uml" => '\u{00a8}',
		"upsih" => '\u{03d2}',
		"Upsilon" => '\u{03a5}',
		"upsilon" => '\u{03c5}',
		"Uuml" => '\u{00dc}',
		"uuml" => '\u{00fc}',
		"weierp" => '\u{2118}',
		"Xi" => '\u{039e}',
		"xi" => '\u{03be}',
		"Yacute" => '\u{00dd}',
		"yacute" => '\u{00fd}',
		"yen" => '\u{00a5}',
		"Yuml" => '\u{0178}',
		"yuml" => '\u{00ff}',
		"Zeta" => '\u{0396}',
		"zeta" => '\u{03b6}',
		"zwj" => '\u{200d}',
		"zwnj" => '\u{200c}',
		_ => return None,
	};

	Some(ch)
}
