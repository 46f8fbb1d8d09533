//! Built-in symbol table.
//!
//! Order matters: earlier entries rank higher in autocomplete.

use super::Category::{self, Latex, Markdown, Question};

pub static BUILTIN_SYMBOLS: &[(&str, &str, Category)] = &[
    // Structures
    (r"\frac{a}{b}", "Fraction", Latex),
    (r"\dfrac{a}{b}", "Display fraction", Latex),
    (r"\sqrt{x}", "Square root", Latex),
    (r"\sqrt[n]{x}", "n-th root", Latex),
    (r"\binom{n}{k}", "Binomial coefficient", Latex),
    (r"x^{n}", "Superscript", Latex),
    (r"x_{i}", "Subscript", Latex),
    (r"\sum_{i=1}^{n}", "Summation", Latex),
    (r"\prod_{i=1}^{n}", "Product", Latex),
    (r"\int_{a}^{b}", "Definite integral", Latex),
    (r"\int", "Integral", Latex),
    (r"\iint", "Double integral", Latex),
    (r"\oint", "Contour integral", Latex),
    (r"\lim_{x \to \infty}", "Limit", Latex),
    // Delimiters
    (r"\left( \right)", "Parentheses", Latex),
    (r"\left[ \right]", "Brackets", Latex),
    (r"\left\{ \right\}", "Braces", Latex),
    (r"\left| \right|", "Absolute value", Latex),
    (r"\langle \rangle", "Angle brackets", Latex),
    // Greek
    (r"\alpha", "Alpha", Latex),
    (r"\beta", "Beta", Latex),
    (r"\gamma", "Gamma", Latex),
    (r"\delta", "Delta", Latex),
    (r"\epsilon", "Epsilon", Latex),
    (r"\varepsilon", "Epsilon (variant)", Latex),
    (r"\zeta", "Zeta", Latex),
    (r"\eta", "Eta", Latex),
    (r"\theta", "Theta", Latex),
    (r"\vartheta", "Theta (variant)", Latex),
    (r"\iota", "Iota", Latex),
    (r"\kappa", "Kappa", Latex),
    (r"\lambda", "Lambda", Latex),
    (r"\mu", "Mu", Latex),
    (r"\nu", "Nu", Latex),
    (r"\xi", "Xi", Latex),
    (r"\pi", "Pi", Latex),
    (r"\rho", "Rho", Latex),
    (r"\sigma", "Sigma", Latex),
    (r"\tau", "Tau", Latex),
    (r"\upsilon", "Upsilon", Latex),
    (r"\phi", "Phi", Latex),
    (r"\varphi", "Phi (variant)", Latex),
    (r"\chi", "Chi", Latex),
    (r"\psi", "Psi", Latex),
    (r"\omega", "Omega", Latex),
    (r"\Gamma", "Capital gamma", Latex),
    (r"\Delta", "Capital delta", Latex),
    (r"\Theta", "Capital theta", Latex),
    (r"\Lambda", "Capital lambda", Latex),
    (r"\Xi", "Capital xi", Latex),
    (r"\Pi", "Capital pi", Latex),
    (r"\Sigma", "Capital sigma", Latex),
    (r"\Phi", "Capital phi", Latex),
    (r"\Psi", "Capital psi", Latex),
    (r"\Omega", "Capital omega", Latex),
    // Operators and relations
    (r"\times", "Multiplication", Latex),
    (r"\div", "Division", Latex),
    (r"\pm", "Plus-minus", Latex),
    (r"\mp", "Minus-plus", Latex),
    (r"\cdot", "Centered dot", Latex),
    (r"\cdots", "Centered ellipsis", Latex),
    (r"\ldots", "Ellipsis", Latex),
    (r"\leq", "Less than or equal", Latex),
    (r"\geq", "Greater than or equal", Latex),
    (r"\neq", "Not equal", Latex),
    (r"\approx", "Approximately", Latex),
    (r"\equiv", "Equivalent", Latex),
    (r"\sim", "Similar", Latex),
    (r"\propto", "Proportional to", Latex),
    (r"\infty", "Infinity", Latex),
    (r"\partial", "Partial derivative", Latex),
    (r"\nabla", "Nabla", Latex),
    (r"\angle", "Angle", Latex),
    (r"\perp", "Perpendicular", Latex),
    (r"\parallel", "Parallel", Latex),
    (r"\degree", "Degree", Latex),
    // Sets and logic
    (r"\in", "Element of", Latex),
    (r"\notin", "Not element of", Latex),
    (r"\subset", "Subset", Latex),
    (r"\subseteq", "Subset or equal", Latex),
    (r"\cup", "Union", Latex),
    (r"\cap", "Intersection", Latex),
    (r"\emptyset", "Empty set", Latex),
    (r"\forall", "For all", Latex),
    (r"\exists", "Exists", Latex),
    (r"\neg", "Negation", Latex),
    (r"\land", "Logical and", Latex),
    (r"\lor", "Logical or", Latex),
    // Arrows
    (r"\to", "Right arrow", Latex),
    (r"\rightarrow", "Right arrow", Latex),
    (r"\leftarrow", "Left arrow", Latex),
    (r"\Rightarrow", "Implies", Latex),
    (r"\Leftrightarrow", "If and only if", Latex),
    (r"\mapsto", "Maps to", Latex),
    // Functions
    (r"\sin", "Sine", Latex),
    (r"\cos", "Cosine", Latex),
    (r"\tan", "Tangent", Latex),
    (r"\log", "Logarithm", Latex),
    (r"\ln", "Natural logarithm", Latex),
    (r"\exp", "Exponential", Latex),
    // Accents
    (r"\vec{v}", "Vector", Latex),
    (r"\hat{x}", "Hat", Latex),
    (r"\bar{x}", "Bar", Latex),
    (r"\dot{x}", "Dot", Latex),
    (r"\overline{AB}", "Overline", Latex),
    (r"\underline{x}", "Underline", Latex),
    // Fonts
    (r"\mathbb{R}", "Real numbers", Latex),
    (r"\mathbb{N}", "Natural numbers", Latex),
    (r"\mathbb{Z}", "Integers", Latex),
    (r"\mathbb{Q}", "Rationals", Latex),
    (r"\mathbb{C}", "Complex numbers", Latex),
    (r"\mathbf{v}", "Bold", Latex),
    (r"\mathit{x}", "Italic", Latex),
    (r"\mathrm{d}", "Upright", Latex),
    (r"\mathcal{L}", "Calligraphic", Latex),
    (r"\mathscr{F}", "Script", Latex),
    (r"\mathfrak{g}", "Fraktur", Latex),
    (r"\text{text}", "Text", Latex),
    (r"\texttt{code}", "Monospace text", Latex),
    (r"\textsf{text}", "Sans-serif text", Latex),
    // Markdown
    ("**bold**", "Bold", Markdown),
    ("*italic*", "Italic", Markdown),
    ("`code`", "Inline code", Markdown),
    ("## ", "Heading", Markdown),
    ("- ", "Bullet list item", Markdown),
    ("1. ", "Numbered list item", Markdown),
    ("> ", "Quote", Markdown),
    ("[label](url)", "Link", Markdown),
    // Exam question scaffolding
    (r"\question ", "Question", Question),
    (r"\part ", "Question part", Question),
    (r"\choice ", "Answer choice", Question),
    (r"\CorrectChoice ", "Correct answer choice", Question),
    (r"\points{5}", "Point value", Question),
    (r"\fillin[answer]", "Fill-in blank", Question),
    (r"\answerline", "Answer line", Question),
];
