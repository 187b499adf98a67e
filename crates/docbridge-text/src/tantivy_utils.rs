use tantivy::tokenizer::{
	AsciiFoldingFilter, Language, RawTokenizer, SimpleTokenizer, Stemmer as TantivyStemmer, StopWordFilter, TextAnalyzer,
	TokenStream, WhitespaceTokenizer,
};

use docbridge_core::traits::Stemmer;

pub const ENGLISH_STOPWORDS: &[&str] = &[
	"a","about","above","after","again","against","all","am","an","and","any","are","as","at","be","because","been","before","being","below","between","both","but","by","can","could","did","do","does","doing","down","during","each","few","for","from","further","had","has","have","having","he","her","here","hers","herself","him","himself","his","how","i","if","in","into","is","it","its","itself","just","may","me","might","more","most","must","my","myself","no","nor","not","now","of","off","on","once","only","or","other","our","ours","ourselves","out","over","own","same","shall","she","should","so","some","such","than","that","the","their","theirs","them","themselves","then","there","these","they","this","those","through","to","too","under","until","up","very","was","we","were","what","when","where","which","while","who","whom","whose","why","will","with","would","you","your","yours","yourself","yourselves",
];

/// Word tokenizer with stopword removal. Input is expected to be cleaned text.
pub fn build_word_analyzer(stopwords: &[String]) -> TextAnalyzer {
	TextAnalyzer::builder(SimpleTokenizer::default())
		.filter(StopWordFilter::remove(stopwords.iter().cloned()))
		.build()
}

/// Folds the whole input as a single token so spacing and order survive.
pub fn build_ascii_folder() -> TextAnalyzer {
	TextAnalyzer::builder(RawTokenizer::default()).filter(AsciiFoldingFilter).build()
}

pub fn default_stopwords() -> Vec<String> {
	ENGLISH_STOPWORDS.iter().map(|s| s.to_string()).collect()
}

/// Porter-style English stemming backed by tantivy's snowball filter.
#[derive(Clone)]
pub struct EnglishStemmer {
	analyzer: TextAnalyzer,
}

impl Default for EnglishStemmer {
	fn default() -> Self {
		let analyzer = TextAnalyzer::builder(WhitespaceTokenizer::default()).filter(TantivyStemmer::new(Language::English)).build();
		Self { analyzer }
	}
}

impl EnglishStemmer {
	/// Stems a batch in one pass. Tokens must not contain whitespace.
	pub fn stem_all(&self, words: &[String]) -> Vec<String> {
		if words.is_empty() { return Vec::new(); }
		let joined = words.join(" ");
		let mut analyzer = self.analyzer.clone();
		let mut stream = analyzer.token_stream(&joined);
		let mut stems = Vec::with_capacity(words.len());
		while stream.advance() { stems.push(stream.token().text.clone()); }
		stems
	}
}

impl Stemmer for EnglishStemmer {
	fn stem(&self, word: &str) -> String {
		let mut analyzer = self.analyzer.clone();
		let mut stream = analyzer.token_stream(word);
		if stream.advance() { stream.token().text.clone() } else { word.to_string() }
	}
}
